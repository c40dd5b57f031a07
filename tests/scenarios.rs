use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hls_cosim_core::error::CoreError;
use hls_cosim_core::model::{BasicBlock, Function, Model, RegionKind, Terminator};
use hls_cosim_core::resolve::{ResolvedBlock, ResolvedEvent, ResolvedEventKind, ResolvedTrace, Resolver};
use hls_cosim_core::sim::{SimParams, Simulation};
use hls_cosim_core::trace::Stream;

fn deadline() -> Instant {
    Instant::now() + Duration::from_secs(5)
}

fn plain_block(id: u64, name: &str, start: i64, end: i64, terminator: Terminator) -> Arc<BasicBlock> {
    Arc::new(BasicBlock {
        name: name.to_string(),
        start,
        end,
        terminator,
        region: RegionKind::Sequential,
        events: Vec::new(),
        id,
    })
}

fn single_function_model(blocks: Vec<Arc<BasicBlock>>) -> Model {
    let function = Arc::new(Function {
        name: "top".into(),
        basic_blocks: blocks,
        is_dataflow: false,
    });
    let mut functions = HashMap::new();
    functions.insert("top".to_string(), function);
    Model { functions }
}

fn resolve_all(model: &Model, trace_text: &str) -> ResolvedTrace {
    let mut resolver = Resolver::new(model, trace_text);
    assert!(resolver.run_one_slice(deadline()).unwrap());
    resolver.finish().unwrap()
}

/// S1: two sequential blocks B0(len=5) -> B1(len=3), no events. Expected top
/// cycle = 8.
#[test]
fn s1_sequential_blocks_reach_cycle_8() {
    let model = single_function_model(vec![
        plain_block(0, "b0", 0, 5, Terminator::Other),
        plain_block(1, "b1", 5, 8, Terminator::Ret),
    ]);
    let resolved = resolve_all(&model, "trace_bb\ttop\t0\ntrace_bb\ttop\t1\n");

    let mut sim = Simulation::new(&resolved, &SimParams::new()).unwrap();
    sim.run().unwrap();
    assert_eq!(sim.top.cycle, 8);
}

/// S2: a pipelined loop, ii=2, tripcount=10, wrapped by a trivial entry block
/// (to establish the frame before the `loop` token) and a one-cycle exit
/// block. The loop body (length 4) contributes `end_stage = start(0) +
/// overlap(4) + ii*(tripcount-1)(18) + length(4) - last_block_overlap(2) =
/// 24`; the exit block then adds its own length, reaching cycle 25.
#[test]
fn s2_pipelined_loop_reaches_cycle_25() {
    let pipeline = Arc::new(hls_cosim_core::model::PipelineRegion { id: 1, ii: 2 });
    let entry_block = plain_block(0, "entry", 0, 0, Terminator::Other);
    let body_block = Arc::new(BasicBlock {
        name: "body".into(),
        start: 0,
        end: 4,
        terminator: Terminator::Other,
        region: RegionKind::Pipeline(pipeline),
        events: Vec::new(),
        id: 1,
    });
    let exit_block = plain_block(2, "exit", 4, 5, Terminator::Ret);
    let model = single_function_model(vec![entry_block, body_block, exit_block]);
    let trace_text =
        "trace_bb\ttop\t0\nloop\tL\t10\nloop_bb\ttop\t1\nend_loop_blocks\ntrace_bb\ttop\t1\nend_loop\ntrace_bb\ttop\t2\n";
    let resolved = resolve_all(&model, trace_text);

    let mut sim = Simulation::new(&resolved, &SimParams::new()).unwrap();
    sim.run().unwrap();
    assert_eq!(sim.top.cycle, 25);
}

/// S3: a producer writes 4 items and a consumer reads 4 items from a
/// depth-2 (shift-register) stream. The producer's writes are back-to-back
/// (local stage 0,1,2,3) while the consumer's reads are spaced twice as far
/// apart (local stage 0,2,4,6), so the producer outruns the consumer by one
/// item and briefly holds 2 unread writes before the consumer catches up.
/// Expected: no deadlock, `observed_depth` peaks at 2.
#[test]
fn s3_fifo_backpressure_without_deadlock() {
    let stream = Arc::new(Stream { address: 0, name: "s".into(), id: 0 });

    let write_event = |stage: i64| ResolvedEvent {
        kind: ResolvedEventKind::FifoWrite(stream.clone()),
        start_stage: stage,
        end_stage: stage,
    };
    let read_event = |stage: i64| ResolvedEvent {
        kind: ResolvedEventKind::FifoRead(stream.clone()),
        start_stage: stage,
        end_stage: stage,
    };

    let producer_trace = Arc::new(vec![ResolvedBlock {
        block: plain_block(0, "producer_body", 0, 4, Terminator::Ret),
        start_stage: 0,
        end_stage: 4,
        events: vec![write_event(0), write_event(1), write_event(2), write_event(3)],
    }]);
    let consumer_trace = Arc::new(vec![ResolvedBlock {
        block: plain_block(0, "consumer_body", 0, 7, Terminator::Ret),
        start_stage: 0,
        end_stage: 7,
        events: vec![read_event(0), read_event(2), read_event(4), read_event(6)],
    }]);

    let top_trace = vec![ResolvedBlock {
        block: plain_block(1, "top", 0, 0, Terminator::Other),
        start_stage: 0,
        end_stage: 0,
        events: vec![
            ResolvedEvent {
                kind: ResolvedEventKind::Call {
                    subcall: producer_trace,
                    is_dataflow_sink: false,
                    function_name: Arc::from("producer"),
                    callee_is_sequential: true,
                },
                start_stage: 0,
                end_stage: 0,
            },
            ResolvedEvent {
                kind: ResolvedEventKind::Call {
                    subcall: consumer_trace,
                    is_dataflow_sink: false,
                    function_name: Arc::from("consumer"),
                    callee_is_sequential: true,
                },
                start_stage: 0,
                end_stage: 0,
            },
        ],
    }];

    let resolved = ResolvedTrace {
        top: Arc::new(top_trace),
        streams: vec![stream.clone()],
        axi_interfaces: vec![],
        is_ap_ctrl_chain: false,
        num_stall_events: 10,
        channel_depths: HashMap::from([(0, 2)]),
        axi_latencies: HashMap::new(),
    };

    let mut sim = Simulation::new(&resolved, &SimParams::new()).unwrap();
    sim.run().unwrap();
    assert_eq!(sim.observed_fifo_depths().get(&stream.id), Some(&2));
}

/// S5: a single `axi_readreq(offset=0, length=64)` fires at cycle 10 on an
/// interface with latency 20. The matching `axi_read` cannot complete before
/// `10 + 20 + 12 = 42`, regardless of how early its own static stage is.
#[test]
fn s5_axi_read_completes_at_cycle_42() {
    let interface = Arc::new(hls_cosim_core::trace::AxiInterface {
        address: 0,
        name: "m_axi".into(),
        id: 0,
    });
    let stream = Arc::new(Stream { address: 0, name: "seed".into(), id: 0 });

    let top_trace = vec![ResolvedBlock {
        block: plain_block(0, "top", 0, 11, Terminator::Ret),
        start_stage: 0,
        end_stage: 11,
        events: vec![
            // Stage-0 primer: anchors the frame's virtual clock at the
            // frame's own start before the first AXI event, since nothing
            // else establishes that baseline for a frame's very first group.
            ResolvedEvent {
                kind: ResolvedEventKind::FifoWrite(stream.clone()),
                start_stage: 0,
                end_stage: 0,
            },
            ResolvedEvent {
                kind: ResolvedEventKind::AxiReadReq {
                    interface: interface.clone(),
                    offset: 0,
                    length: 64,
                },
                start_stage: 10,
                end_stage: 10,
            },
            ResolvedEvent {
                kind: ResolvedEventKind::AxiRead {
                    interface: interface.clone(),
                    length: 64,
                },
                start_stage: 10,
                end_stage: 11,
            },
        ],
    }];

    let resolved = ResolvedTrace {
        top: Arc::new(top_trace),
        streams: vec![stream],
        axi_interfaces: vec![interface],
        is_ap_ctrl_chain: false,
        num_stall_events: 3,
        channel_depths: HashMap::new(),
        axi_latencies: HashMap::from([(0, 20)]),
    };

    let mut sim = Simulation::new(&resolved, &SimParams::new()).unwrap();
    sim.run().unwrap();
    assert_eq!(sim.top.cycle, 42);
}

/// S4: two sibling frames each permanently blocked reading a stream the
/// other never writes. The simulator must report a deadlock.
#[test]
fn s4_mutual_fifo_read_deadlocks() {
    let stream_a = Arc::new(Stream { address: 0, name: "a".into(), id: 0 });
    let stream_b = Arc::new(Stream { address: 1, name: "b".into(), id: 1 });

    let leaf_block = |events| ResolvedBlock {
        block: plain_block(0, "leaf", 0, 0, Terminator::Ret),
        start_stage: 0,
        end_stage: 0,
        events,
    };

    let producer_trace = Arc::new(vec![leaf_block(vec![ResolvedEvent {
        kind: ResolvedEventKind::FifoRead(stream_b.clone()),
        start_stage: 0,
        end_stage: 0,
    }])]);
    let consumer_trace = Arc::new(vec![leaf_block(vec![ResolvedEvent {
        kind: ResolvedEventKind::FifoRead(stream_a.clone()),
        start_stage: 0,
        end_stage: 0,
    }])]);

    let top_trace = vec![ResolvedBlock {
        block: plain_block(1, "top", 0, 0, Terminator::Other),
        start_stage: 0,
        end_stage: 0,
        events: vec![
            ResolvedEvent {
                kind: ResolvedEventKind::Call {
                    subcall: producer_trace,
                    is_dataflow_sink: false,
                    function_name: Arc::from("producer"),
                    callee_is_sequential: true,
                },
                start_stage: 0,
                end_stage: 0,
            },
            ResolvedEvent {
                kind: ResolvedEventKind::Call {
                    subcall: consumer_trace,
                    is_dataflow_sink: false,
                    function_name: Arc::from("consumer"),
                    callee_is_sequential: true,
                },
                start_stage: 0,
                end_stage: 0,
            },
        ],
    }];

    let resolved = ResolvedTrace {
        top: Arc::new(top_trace),
        streams: vec![stream_a, stream_b],
        axi_interfaces: vec![],
        is_ap_ctrl_chain: false,
        num_stall_events: 4,
        channel_depths: HashMap::from([(0, 1), (1, 1)]),
        axi_latencies: HashMap::new(),
    };

    let mut sim = Simulation::new(&resolved, &SimParams::new()).unwrap();
    let err = sim.run().unwrap_err();
    assert!(matches!(err, CoreError::Deadlock(_)));
}

/// S6: ap_ctrl_chain top with N=3 scalar ports, ap_done_cycle=100.
/// read_interval = 5+3+1=9; ap_done_read_cycle = ceil((100-5)/9)*9+5 = 104;
/// ap_continue = 104 + 6 = 110.
#[test]
fn s6_ap_ctrl_chain_continue_cycle() {
    let top_trace = vec![ResolvedBlock {
        block: plain_block(0, "top", 0, 100, Terminator::Ret),
        start_stage: 0,
        end_stage: 100,
        events: vec![],
    }];
    let resolved = ResolvedTrace {
        top: Arc::new(top_trace),
        streams: vec![],
        axi_interfaces: vec![],
        is_ap_ctrl_chain: true,
        num_stall_events: 1,
        channel_depths: HashMap::new(),
        axi_latencies: HashMap::new(),
    };
    let params = SimParams::new().with_ap_ctrl_chain_top_port_count(3);
    let mut sim = Simulation::new(&resolved, &params).unwrap();
    sim.run().unwrap();
    assert_eq!(sim.top.cycle, 100);
    assert_eq!(sim.ap_continue_cycle(), Some(110));
}

#[test]
fn empty_trace_reports_kernel_did_not_run() {
    let model = single_function_model(vec![plain_block(0, "b0", 0, 5, Terminator::Ret)]);
    let mut resolver = Resolver::new(&model, "");
    let err = resolver.run_one_slice(deadline()).unwrap_err();
    assert!(matches!(err, CoreError::KernelDidNotRun));
}
