//! Replay order properties of the command buffer.

mod support;

use glint_block::{Block, BlockValue};
use proptest::prelude::*;
use support::{fmt_args, Tape};

#[derive(Debug, Clone)]
enum Op {
    Command(&'static str, Vec<i64>),
    Set(&'static str, i64),
    Send(&'static str, Option<i64>),
}

fn op() -> impl Strategy<Value = Op> {
    let command = prop::sample::select(vec!["load", "edit", "save", "cancel", "hasChanged", "isValid"]);
    let attribute = prop::sample::select(vec!["id", "place", "el"]);
    let custom = prop::sample::select(vec!["title", "render"]);
    prop_oneof![
        (command, prop::collection::vec(-5i64..5, 0..3)).prop_map(|(c, args)| Op::Command(c, args)),
        (attribute, any::<i64>()).prop_map(|(a, v)| Op::Set(a, v)),
        (custom, prop::option::of(0i64..100)).prop_map(|(c, v)| Op::Send(c, v)),
    ]
}

/// Issues `op` and returns the entry the tape will record for it.
fn issue(block: &mut Block, op: &Op) -> String {
    match op {
        Op::Command(name, args) => {
            let args: Vec<BlockValue> = args.iter().map(|&a| BlockValue::from(a)).collect();
            block.call(name, &args).unwrap();
            format!("call {}({})", name, fmt_args(&args))
        }
        Op::Set(name, value) => {
            block.call(name, &[BlockValue::from(*value)]).unwrap();
            format!("set {}={}", name, value)
        }
        Op::Send(name, value) => {
            let args: Vec<BlockValue> = value.iter().map(|&v| BlockValue::from(v)).collect();
            block.send(name, args).unwrap();
            match value {
                Some(v) => format!("set {}={}", name, v),
                None => String::new(),
            }
        }
    }
}

proptest! {
    #[test]
    fn replay_matches_issue_order(ops in prop::collection::vec(op(), 0..40)) {
        let mut block = Block::new();
        let expected: Vec<String> = ops
            .iter()
            .map(|op| issue(&mut block, op))
            .filter(|entry| !entry.is_empty())
            .collect();
        prop_assert_eq!(block.pending().len(), ops.len());

        let tape = Tape::with_commands().shared();
        block.set_delegate(tape.clone()).unwrap();
        prop_assert!(block.pending().is_empty());
        prop_assert_eq!(&tape.borrow().log, &expected);

        // Nothing is replayed twice.
        block.set_delegate(tape.clone()).unwrap();
        prop_assert_eq!(&tape.borrow().log, &expected);
    }

    #[test]
    fn attached_block_never_buffers(ops in prop::collection::vec(op(), 0..20)) {
        let tape = Tape::with_commands().shared();
        let mut block = Block::from_delegate(tape.clone());
        for op in &ops {
            issue(&mut block, op);
            prop_assert!(block.pending().is_empty());
        }
    }
}
