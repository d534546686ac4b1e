//! Property tests for the frame parser and telemetry decoder

use proptest::prelude::*;
use roadhub_protocol::{decode_update, Frame, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};

proptest! {
    #[test]
    fn parser_recovers_frame_after_line_noise(
        noise in prop::collection::vec(any::<u8>().prop_filter("not a start byte", |b| *b != FRAME_START), 0..32),
        msg_type in any::<u8>(),
        payload in prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
    ) {
        let frame = Frame::new(msg_type, &payload).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        for &byte in &noise {
            prop_assert_eq!(parser.feed(byte), Ok(None));
        }

        let parsed = parser.feed_bytes(&encoded).unwrap();
        prop_assert_eq!(parsed, Some(frame));
    }

    #[test]
    fn parser_survives_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..1024)) {
        let mut parser = FrameParser::new();
        for byte in bytes {
            if let Ok(Some(frame)) = parser.feed(byte) {
                prop_assert!(frame.payload.len() <= MAX_PAYLOAD_SIZE);
            }
        }
    }

    #[test]
    fn corrupted_checksum_is_rejected(
        msg_type in any::<u8>(),
        payload in prop::collection::vec(any::<u8>(), 0..64),
        flip in 1u8..=255,
    ) {
        let frame = Frame::new(msg_type, &payload).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= flip;

        let mut parser = FrameParser::new();
        prop_assert!(parser.feed_bytes(&encoded).is_err());
    }

    #[test]
    fn decode_update_never_panics(text in ".{0,200}") {
        let _ = decode_update(&text);
    }

    #[test]
    fn decode_update_reads_any_project_count(count in any::<u32>()) {
        let text = format!("{{\"projects\":{},\"extra\":null}}", count);
        let update = decode_update(&text).unwrap();
        prop_assert_eq!(update.project_count, Some(count));
        prop_assert_eq!(update.agent_count, None);
    }
}
