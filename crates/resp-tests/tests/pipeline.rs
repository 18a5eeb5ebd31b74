//! Pipeline-level behavior: arrival order, agreement between the
//! single-frame and pipeline entry points, agreement between the sync and
//! async decoders, and error propagation across a whole stream.

use std::io::Cursor;

use resp_decoder::{
    DecodeError, DecoderConfig, RespDecoder, StreamingDecoder, decode_bytes, decode_one,
    decode_pipeline,
};
use resp_tests::{
    BINARY_SET, GET_PIPELINE, HELLO_PAIR, MIXED_REPLIES, NESTED, command_burst, large_bulk,
};
use resp_types::Frame;

const ALL_CAPTURES: [&[u8]; 5] = [GET_PIPELINE, HELLO_PAIR, MIXED_REPLIES, BINARY_SET, NESTED];

#[test]
fn get_pipeline_yields_both_commands_in_order() {
    let pipeline = decode_bytes(GET_PIPELINE).unwrap();
    assert_eq!(pipeline, vec!["GET A", "GET B"]);
}

#[test]
fn pipeline_equals_repeated_decode_one() {
    for capture in ALL_CAPTURES {
        let mut source = Cursor::new(capture);
        let mut singles = Vec::new();
        while let Some(result) = decode_one(&mut source).unwrap() {
            singles.push(result);
        }
        assert_eq!(decode_bytes(capture).unwrap(), singles);
    }
}

#[test]
fn pipeline_of_concatenated_captures_is_concatenated_pipelines() {
    let mut joined = GET_PIPELINE.to_vec();
    joined.extend_from_slice(MIXED_REPLIES);

    let mut expected = decode_bytes(GET_PIPELINE).unwrap();
    expected.extend(decode_bytes(MIXED_REPLIES).unwrap());

    assert_eq!(decode_bytes(&joined).unwrap(), expected);
}

#[test]
fn independent_decoders_give_identical_output() {
    for capture in ALL_CAPTURES {
        let first = RespDecoder::new(capture).decode_pipeline().unwrap();
        let second = RespDecoder::new(capture).decode_pipeline().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn buffer_capacity_does_not_change_results() {
    let burst = command_burst(500);
    let expected = decode_bytes(&burst).unwrap();
    for capacity in [1, 7, 64, 32 * 1024] {
        let config = DecoderConfig {
            buffer_capacity: capacity,
            ..DecoderConfig::default()
        };
        let got = RespDecoder::with_config(&burst[..], &config)
            .decode_pipeline()
            .unwrap();
        assert_eq!(got, expected, "capacity {capacity}");
    }
}

#[test]
fn burst_decodes_every_command() {
    let pipeline = decode_bytes(&command_burst(1000)).unwrap();
    assert_eq!(pipeline.len(), 1000);
    assert!(pipeline.iter().all(|entry| entry == "INCR counter"));
}

#[test]
fn large_bulk_is_read_whole() {
    let pipeline = decode_bytes(&large_bulk(100 * 1024)).unwrap();
    assert_eq!(pipeline.len(), 1);
    assert_eq!(pipeline[0].len(), 100 * 1024);
}

#[test]
fn error_midway_discards_earlier_frames() {
    let mut wire = GET_PIPELINE.to_vec();
    wire.extend_from_slice(b"%bogus\r\n");
    let err = decode_bytes(&wire).unwrap_err();
    assert!(err.is_invalid_syntax());
}

#[test]
fn free_pipeline_drains_what_decode_one_left() {
    let mut source = Cursor::new(GET_PIPELINE);
    assert_eq!(decode_one(&mut source).unwrap().unwrap(), "GET A");
    assert_eq!(decode_pipeline(&mut source).unwrap(), vec!["GET B"]);
    assert!(decode_pipeline(&mut source).unwrap().is_empty());
}

#[test]
fn frames_iterator_matches_read_frame() {
    let mut decoder = RespDecoder::new(MIXED_REPLIES);
    let from_iter: Vec<Frame> = decoder.frames().collect::<Result<_, _>>().unwrap();

    let mut decoder = RespDecoder::new(MIXED_REPLIES);
    let mut from_calls = Vec::new();
    while let Some(frame) = decoder.read_frame().unwrap() {
        from_calls.push(frame);
    }

    assert_eq!(from_iter, from_calls);
    assert_eq!(from_iter.len(), 8);
}

#[test]
fn flattened_frames_equal_decode_one_results() {
    let frames: Vec<Frame> = RespDecoder::new(NESTED)
        .frames()
        .collect::<Result<_, _>>()
        .unwrap();
    let flattened: Vec<_> = frames.iter().map(Frame::flatten).collect();
    assert_eq!(flattened, decode_bytes(NESTED).unwrap());
}

#[test]
fn position_reaches_end_of_capture() {
    let mut decoder = RespDecoder::new(MIXED_REPLIES);
    decoder.decode_pipeline().unwrap();
    assert_eq!(decoder.position(), MIXED_REPLIES.len() as u64);
}

#[tokio::test]
async fn streaming_agrees_with_sync_on_every_capture() {
    for capture in ALL_CAPTURES {
        let sync = decode_bytes(capture).unwrap();
        let streamed = StreamingDecoder::new(capture)
            .decode_pipeline()
            .await
            .unwrap();
        assert_eq!(sync, streamed);
    }
}

#[tokio::test]
async fn streaming_frames_match_sync_frames() {
    let mut sync = RespDecoder::new(NESTED);
    let mut streaming = StreamingDecoder::new(NESTED);
    while let Some(frame) = sync.read_frame().unwrap() {
        assert_eq!(streaming.next().await.unwrap().unwrap(), frame);
    }
    assert!(streaming.next().await.is_none());
}

#[tokio::test]
async fn streaming_reads_from_a_duplex_pipe() {
    use tokio::io::AsyncWriteExt;

    let (mut client, server) = tokio::io::duplex(16);
    let writer = tokio::spawn(async move {
        for chunk in GET_PIPELINE.chunks(5) {
            client.write_all(chunk).await.unwrap();
        }
    });

    let pipeline = StreamingDecoder::new(server).decode_pipeline().await.unwrap();
    writer.await.unwrap();
    assert_eq!(pipeline, vec!["GET A", "GET B"]);
}

#[tokio::test]
async fn streaming_error_discards_pipeline() {
    let err = StreamingDecoder::new(&b"+OK\r\n*2\r\n+a\r\n"[..])
        .decode_pipeline()
        .await
        .unwrap_err();
    assert!(matches!(err, DecodeError::Incomplete { .. }));
}
