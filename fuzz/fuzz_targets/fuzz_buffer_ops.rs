#![no_main]

use std::collections::VecDeque;

use feedkit_core::{BufferConfig, BufferOp, ByteAccumulator, StreamError};
use libfuzzer_sys::fuzz_target;

// Small start and a ceiling so growth and refusal paths are both reached.
const CONFIG: BufferConfig = BufferConfig::new()
    .with_initial_capacity(8)
    .with_max_capacity(4096);

fuzz_target!(|ops: Vec<BufferOp>| {
    let Ok(mut buffer) = ByteAccumulator::with_config(CONFIG) else {
        return;
    };
    let mut model: VecDeque<u8> = VecDeque::new();

    for op in &ops {
        let capacity = buffer.capacity();
        let unread = buffer.unread().to_vec();

        match buffer.apply(op) {
            Ok(consumed) => {
                match op {
                    BufferOp::Append(bytes) => model.extend(bytes.iter().copied()),
                    BufferOp::Consume(max) => {
                        let take = usize::from(*max).min(model.len());
                        let expected: Vec<u8> = model.drain(..take).collect();
                        assert_eq!(consumed, expected);
                    }
                    BufferOp::Compact => assert_eq!(buffer.cursor(), 0),
                }
            }
            Err(StreamError::CapacityExceeded { max, .. }) => {
                assert_eq!(max, 4096);
                assert_eq!(buffer.unread(), unread.as_slice());
            }
            Err(err) => panic!("unexpected error: {err}"),
        }

        assert_eq!(buffer.available(), model.len());
        assert!(buffer.capacity() >= capacity);
        assert!(buffer.capacity() <= 4096);
        assert!(buffer.unread().iter().eq(model.iter()));
    }
});
