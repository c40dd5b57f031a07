//! Trace resolution: fold raw [`crate::trace::Token`]s against the static
//! CDFG model into a tree of [`ResolvedBlock`]s, ported from
//! `original_source/backend/lightningsim/trace_file.py`'s `resolve_trace`.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::error::CoreError;
use crate::model::{BasicBlock, Function, Model, Opcode, Terminator};
use crate::trace::{AxiInterface, InterningTables, Stream, Token, TokenReader};

/// A single resolved event, tagged with its absolute stage interval within
/// the enclosing frame's dynamic timeline.
#[derive(Debug, Clone)]
pub struct ResolvedEvent {
    pub kind: ResolvedEventKind,
    pub start_stage: i64,
    pub end_stage: i64,
}

#[derive(Debug, Clone)]
pub enum ResolvedEventKind {
    Call {
        subcall: Arc<Vec<ResolvedBlock>>,
        is_dataflow_sink: bool,
        function_name: Arc<str>,
        /// `true` when the callee's entry block is neither pipelined nor in a
        /// dataflow region — determines the call's cycle `start_delay`
        /// (`spec.md` §4.2.1).
        callee_is_sequential: bool,
    },
    FifoRead(Arc<Stream>),
    FifoWrite(Arc<Stream>),
    AxiReadReq {
        interface: Arc<AxiInterface>,
        offset: u64,
        length: u64,
    },
    AxiWriteReq {
        interface: Arc<AxiInterface>,
        offset: u64,
        length: u64,
    },
    AxiRead {
        interface: Arc<AxiInterface>,
        length: u64,
    },
    AxiWrite {
        interface: Arc<AxiInterface>,
        length: u64,
    },
    AxiWriteResp {
        interface: Arc<AxiInterface>,
    },
}

/// A fully resolved basic-block visit.
#[derive(Debug, Clone)]
pub struct ResolvedBlock {
    pub block: Arc<BasicBlock>,
    pub start_stage: i64,
    pub end_stage: i64,
    pub events: Vec<ResolvedEvent>,
}

/// The fully resolved, immutable result of trace resolution. Cheaply
/// clonable: every subcall trace is `Arc`-shared, so handing the same
/// resolved trace to multiple simulations does not deep-copy anything.
#[derive(Debug, Clone)]
pub struct ResolvedTrace {
    pub top: Arc<Vec<ResolvedBlock>>,
    pub streams: Vec<Arc<Stream>>,
    pub axi_interfaces: Vec<Arc<AxiInterface>>,
    pub is_ap_ctrl_chain: bool,
    pub num_stall_events: usize,
    /// Declared depths/latencies from `spec_channel`/`spec_interface` tokens,
    /// used as defaults when [`crate::sim::SimParams`] doesn't override them.
    pub channel_depths: std::collections::HashMap<u32, usize>,
    pub axi_latencies: std::collections::HashMap<u32, i64>,
}

/// State accumulated for a basic block while its events are being absorbed.
struct PartialBlock {
    block: Arc<BasicBlock>,
    start_stage: i64,
    end_stage: i64,
    events: Vec<ResolvedEvent>,
    next_event_index: usize,
    loop_index: i64,
    ii: i64,
}

/// The prototype of a loop body collected between `loop` and `end_loop_blocks`.
struct LoopPrototype {
    name: String,
    tripcount: i64,
    start_stage: i64,
    body_blocks: Vec<Arc<BasicBlock>>,
}

/// A resolved loop construct, active while its body is being replayed.
struct ActiveLoop {
    ii: i64,
    loop_index: i64,
    end_stage: i64,
    first_block_id: u64,
}

/// One active call frame.
struct Frame {
    function: Arc<Function>,
    dynamic_stage: i64,
    static_stage: i64,
    latest_dynamic_stage: i64,
    latest_static_stage: i64,
    pipeline: Option<Arc<crate::model::PipelineRegion>>,
    blocks_seen: HashSet<u64>,
    current_block: Option<PartialBlock>,
    trace: Vec<ResolvedBlock>,
    /// A `ret`-terminated block has been fully absorbed but the frame can't
    /// be popped yet: a `call` event in that same block spawned a callee
    /// frame that hasn't received its first `trace_bb` yet. See §4.1.4.
    pending_pop: bool,
    loop_proto: Option<LoopPrototype>,
    active_loop: Option<ActiveLoop>,
}

impl Frame {
    fn new(function: Arc<Function>) -> Self {
        Self {
            function,
            dynamic_stage: 0,
            static_stage: 0,
            latest_dynamic_stage: 0,
            latest_static_stage: 0,
            pipeline: None,
            blocks_seen: HashSet::new(),
            current_block: None,
            trace: Vec::new(),
            pending_pop: false,
            loop_proto: None,
            active_loop: None,
        }
    }
}

/// Cooperative-batching trace resolver. One `Resolver` consumes an entire
/// token stream, possibly across multiple [`Resolver::run_one_slice`] calls.
pub struct Resolver<'a> {
    model: &'a Model,
    tokens: TokenReader<'a>,
    total_tokens: usize,
    tokens_consumed: usize,
    interning: InterningTables,
    streams: Vec<Arc<Stream>>,
    axi_interfaces: Vec<Arc<AxiInterface>>,
    is_ap_ctrl_chain: bool,
    stack: Vec<Frame>,
    finished: Option<Vec<ResolvedBlock>>,
    started: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(model: &'a Model, trace_text: &'a str) -> Self {
        let total_tokens = trace_text.lines().filter(|l| !l.trim().is_empty()).count();
        Self {
            model,
            tokens: TokenReader::new(trace_text),
            total_tokens,
            tokens_consumed: 0,
            interning: InterningTables::default(),
            streams: Vec::new(),
            axi_interfaces: Vec::new(),
            is_ap_ctrl_chain: false,
            stack: Vec::new(),
            finished: None,
            started: false,
        }
    }

    pub fn progress(&self) -> f64 {
        if self.total_tokens == 0 {
            1.0
        } else {
            self.tokens_consumed as f64 / self.total_tokens as f64
        }
    }

    /// Consumes tokens until the deadline elapses or the trace is fully
    /// resolved. Returns `true` when resolution is complete.
    pub fn run_one_slice(&mut self, deadline: Instant) -> Result<bool, CoreError> {
        loop {
            if self.finished.is_some() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            match self.tokens.next() {
                None => {
                    if !self.started {
                        return Err(CoreError::KernelDidNotRun);
                    }
                    if !self.stack.is_empty() {
                        return Err(CoreError::IncompleteTrace {
                            open_frames: self.stack.len(),
                        });
                    }
                    // unreachable: the top frame's pop sets `self.finished`.
                    return Err(CoreError::InvariantViolated(
                        "trace ended without finishing the top frame".into(),
                    ));
                }
                Some(token) => {
                    self.started = true;
                    self.tokens_consumed += 1;
                    self.process(token?)?;
                }
            }
        }
    }

    pub fn finish(self) -> Result<ResolvedTrace, CoreError> {
        let top = self
            .finished
            .ok_or_else(|| CoreError::InvariantViolated("resolver not finished".into()))?;
        let num_stall_events = count_events(&top);
        Ok(ResolvedTrace {
            top: Arc::new(top),
            streams: self.streams,
            axi_interfaces: self.axi_interfaces,
            is_ap_ctrl_chain: self.is_ap_ctrl_chain,
            num_stall_events,
            channel_depths: self.interning.channel_depths,
            axi_latencies: self.interning.axi_latencies,
        })
    }

    fn process(&mut self, token: Token) -> Result<(), CoreError> {
        match token {
            Token::SpecChannel { channel_id, depth } => {
                self.interning.channel_depths.insert(channel_id, depth);
                self.streams.push(Arc::new(Stream {
                    address: channel_id as u64,
                    name: format!("stream{channel_id}"),
                    id: channel_id,
                }));
            }
            Token::SpecInterface { interface_id, latency } => {
                self.interning.axi_latencies.insert(interface_id, latency);
                self.axi_interfaces.push(Arc::new(AxiInterface {
                    address: interface_id as u64,
                    name: format!("axi{interface_id}"),
                    id: interface_id,
                }));
                self.axi_interfaces.sort_by_key(|i| i.address);
            }
            Token::ApCtrlChain { .. } => {
                self.is_ap_ctrl_chain = true;
            }
            Token::TraceBb { function, block_index } => {
                self.handle_trace_bb(&function, block_index)?;
            }
            Token::LoopBb { function, block_index } => {
                self.handle_loop_bb(&function, block_index)?;
            }
            Token::Loop { name, tripcount } => {
                self.handle_loop_start(name, tripcount)?;
            }
            Token::EndLoopBlocks => {
                self.handle_end_loop_blocks()?;
            }
            Token::EndLoop => {
                self.handle_end_loop()?;
            }
            other => {
                self.absorb_event(other)?;
            }
        }
        Ok(())
    }

    fn top(&mut self) -> Result<&mut Frame, CoreError> {
        self.stack
            .last_mut()
            .ok_or_else(|| CoreError::ProtocolViolation("event token with no active frame".into()))
    }

    fn lookup_function(&self, name: &str) -> Result<Arc<Function>, CoreError> {
        self.model
            .function(name)
            .cloned()
            .ok_or_else(|| CoreError::ProtocolViolation(format!("unknown function {name:?}")))
    }

    fn lookup_block(function: &Function, index: usize) -> Result<Arc<BasicBlock>, CoreError> {
        function
            .basic_blocks
            .get(index)
            .cloned()
            .ok_or_else(|| {
                CoreError::ProtocolViolation(format!(
                    "block index {index} out of range for {:?}",
                    function.name
                ))
            })
    }

    fn handle_trace_bb(&mut self, function_name: &str, block_index: usize) -> Result<(), CoreError> {
        if self.stack.is_empty() {
            let function = self.lookup_function(function_name)?;
            self.stack.push(Frame::new(function));
        }
        let loop_index_offset = {
            let frame = self.top()?;
            if frame.current_block.is_some() {
                return Err(CoreError::ProtocolViolation(
                    "trace_bb while a block was still being filled".into(),
                ));
            }
            frame
                .active_loop
                .as_ref()
                .map(|l| l.ii * l.loop_index)
                .unwrap_or(0)
        };

        let function = self.top()?.function.clone();
        let block = Self::lookup_block(&function, block_index)?;
        self.enter_block(block, loop_index_offset)?;
        Ok(())
    }

    /// Stage arithmetic on block entry, §4.1.1. `loop_offset` is the
    /// additional `ii * loop_index` shift applied to replayed loop-body
    /// blocks (§4.1.3); it is 0 outside of loop replay.
    fn enter_block(&mut self, block: Arc<BasicBlock>, loop_offset: i64) -> Result<(), CoreError> {
        let frame = self.top()?;
        let pipeline = block.pipeline().cloned();
        if pipeline.as_deref().map(|p| p.id) != frame.pipeline.as_deref().map(|p| p.id) {
            frame.dynamic_stage = frame.latest_dynamic_stage;
            frame.static_stage = frame.latest_static_stage;
        }
        frame.pipeline = pipeline.clone();

        let mut overlap = frame.static_stage - block.start;
        let seen = frame.blocks_seen.contains(&block.id);
        match &pipeline {
            None => {
                if overlap < -1 || seen {
                    overlap = -1;
                }
            }
            Some(p) => {
                if seen {
                    overlap -= p.ii;
                }
            }
        }

        if seen {
            frame.blocks_seen.clear();
        }
        frame.blocks_seen.insert(block.id);

        frame.dynamic_stage += block.length() - overlap;
        frame.static_stage = block.end;
        if frame.dynamic_stage >= frame.latest_dynamic_stage {
            frame.latest_dynamic_stage = frame.dynamic_stage;
            frame.latest_static_stage = frame.static_stage;
        }

        let start_stage = frame.dynamic_stage - block.length() + loop_offset;
        let end_stage = frame.dynamic_stage + loop_offset;
        trace!(block = %block.name, start_stage, end_stage, "resolved block entry");

        frame.current_block = Some(PartialBlock {
            block: block.clone(),
            start_stage,
            end_stage,
            events: Vec::new(),
            next_event_index: 0,
            loop_index: frame.active_loop.as_ref().map(|l| l.loop_index).unwrap_or(0),
            ii: frame.active_loop.as_ref().map(|l| l.ii).unwrap_or(0),
        });

        if block.events.is_empty() {
            self.finish_current_block()?;
        }
        Ok(())
    }

    fn handle_loop_bb(&mut self, function_name: &str, block_index: usize) -> Result<(), CoreError> {
        let function = if self.stack.is_empty() {
            self.lookup_function(function_name)?
        } else {
            self.top()?.function.clone()
        };
        let block = Self::lookup_block(&function, block_index)?;
        if self.stack.is_empty() {
            self.stack.push(Frame::new(function));
        }
        let frame = self.top()?;
        let proto = frame
            .loop_proto
            .as_mut()
            .ok_or_else(|| CoreError::ProtocolViolation("loop_bb outside a loop construct".into()))?;
        proto.body_blocks.push(block);
        Ok(())
    }

    fn handle_loop_start(&mut self, name: String, tripcount: i64) -> Result<(), CoreError> {
        let frame = self.top()?;
        if frame.loop_proto.is_some() {
            return Err(CoreError::ProtocolViolation("nested loop construct collection".into()));
        }
        frame.loop_proto = Some(LoopPrototype {
            name,
            tripcount,
            start_stage: frame.dynamic_stage,
            body_blocks: Vec::new(),
        });
        Ok(())
    }

    fn handle_end_loop_blocks(&mut self) -> Result<(), CoreError> {
        let frame = self.top()?;
        let proto = frame
            .loop_proto
            .take()
            .ok_or_else(|| CoreError::ProtocolViolation("end_loop_blocks without a loop".into()))?;
        let first = proto
            .body_blocks
            .first()
            .ok_or_else(|| CoreError::ProtocolViolation("loop with empty body".into()))?
            .clone();
        let last = proto.body_blocks.last().unwrap().clone();

        let loop_overlap_length = last.end - first.start;
        let (ii, last_block_overlap) = if let Some(p) = last.pipeline() {
            (p.ii, loop_overlap_length - p.ii)
        } else {
            (loop_overlap_length + 1, -1)
        };

        let end_stage =
            proto.start_stage + loop_overlap_length + ii * (proto.tripcount - 1) + first.length() - last_block_overlap;

        debug!(loop_name = %proto.name, tripcount = proto.tripcount, ii, end_stage, "resolved loop construct");

        frame.active_loop = Some(ActiveLoop {
            ii,
            loop_index: 0,
            end_stage,
            first_block_id: first.id,
        });
        Ok(())
    }

    fn handle_end_loop(&mut self) -> Result<(), CoreError> {
        let frame = self.top()?;
        let active = frame
            .active_loop
            .take()
            .ok_or_else(|| CoreError::ProtocolViolation("end_loop without an active loop".into()))?;
        frame.dynamic_stage = active.end_stage;
        if frame.dynamic_stage >= frame.latest_dynamic_stage {
            frame.latest_dynamic_stage = frame.dynamic_stage;
            frame.latest_static_stage = frame.static_stage;
        }
        frame.blocks_seen.clear();
        frame.blocks_seen.insert(active.first_block_id);
        Ok(())
    }

    /// Advances `active_loop.loop_index` when the replayed body wraps back to
    /// its first block, i.e. a later `trace_bb` re-enters the loop's first
    /// body block.
    fn advance_loop_index_if_wrapping(&mut self, block_id: u64) -> Result<(), CoreError> {
        let frame = self.top()?;
        if let Some(active) = frame.active_loop.as_mut() {
            if block_id == active.first_block_id && frame.blocks_seen.len() > 1 {
                active.loop_index += 1;
            }
        }
        Ok(())
    }

    fn absorb_event(&mut self, token: Token) -> Result<(), CoreError> {
        // Snapshot what's needed from the open block without holding a
        // borrow across the `self.stream`/`self.axi_interface` lookups below.
        let (block, next_event_index, block_start_stage, loop_shift) = {
            let frame = self.top()?;
            let partial = frame
                .current_block
                .as_ref()
                .ok_or_else(|| CoreError::ProtocolViolation("event token with no block being filled".into()))?;
            (
                partial.block.clone(),
                partial.next_event_index,
                partial.start_stage,
                partial.ii * partial.loop_index,
            )
        };
        let instr = block
            .events
            .get(next_event_index)
            .cloned()
            .ok_or_else(|| CoreError::ProtocolViolation("more events than the static block declares".into()))?;
        let start_stage = block_start_stage + instr.relative_start + loop_shift;
        let end_stage = block_start_stage + instr.relative_end + loop_shift;

        if instr.opcode == Opcode::Call {
            // A call does not consume this token; it belongs to the callee's
            // first `trace_bb`. Push the callee frame and record the call
            // event with an as-yet-empty subcall trace placeholder.
            let callee_info = instr
                .callee
                .clone()
                .ok_or_else(|| CoreError::InvariantViolated("call instruction missing callee info".into()))?;
            let is_dataflow_sink = callee_info.is_dataflow_sink;
            let function_name: Arc<str> = Arc::from(callee_info.function.name.as_str());
            let entry_block = callee_info
                .function
                .basic_blocks
                .first()
                .ok_or_else(|| CoreError::InvariantViolated("callee function has no basic blocks".into()))?;
            let callee_is_sequential = matches!(entry_block.region, crate::model::RegionKind::Sequential);

            self.top()?.current_block.as_mut().unwrap().next_event_index += 1;
            self.top()?
                .current_block
                .as_mut()
                .unwrap()
                .events
                .push(ResolvedEvent {
                    kind: ResolvedEventKind::Call {
                        subcall: Arc::new(Vec::new()),
                        is_dataflow_sink,
                        function_name,
                        callee_is_sequential,
                    },
                    start_stage,
                    end_stage,
                });
            self.stack.push(Frame::new(callee_info.function));
            return Ok(());
        }

        let expected_name = instr.opcode.name();
        let kind = match (&instr.opcode, &token) {
            (Opcode::FifoRead, Token::FifoRead { channel_id }) => {
                ResolvedEventKind::FifoRead(self.stream(*channel_id)?)
            }
            (Opcode::FifoWrite, Token::FifoWrite { channel_id }) => {
                ResolvedEventKind::FifoWrite(self.stream(*channel_id)?)
            }
            (
                Opcode::AxiReadReq,
                Token::AxiReadReq {
                    interface_id,
                    address,
                    length,
                },
            ) => ResolvedEventKind::AxiReadReq {
                interface: self.axi_interface(*interface_id, *address)?,
                offset: *address,
                length: *length,
            },
            (
                Opcode::AxiWriteReq,
                Token::AxiWriteReq {
                    interface_id,
                    address,
                    length,
                },
            ) => ResolvedEventKind::AxiWriteReq {
                interface: self.axi_interface(*interface_id, *address)?,
                offset: *address,
                length: *length,
            },
            (Opcode::AxiRead, Token::AxiRead { interface_id, length }) => ResolvedEventKind::AxiRead {
                interface: self.axi_interface(*interface_id, 0)?,
                length: *length,
            },
            (Opcode::AxiWrite, Token::AxiWrite { interface_id, length }) => ResolvedEventKind::AxiWrite {
                interface: self.axi_interface(*interface_id, 0)?,
                length: *length,
            },
            (Opcode::AxiWriteResp, Token::AxiWriteResp { interface_id }) => ResolvedEventKind::AxiWriteResp {
                interface: self.axi_interface(*interface_id, 0)?,
            },
            _ => {
                return Err(CoreError::ProtocolViolation(format!(
                    "expected a {expected_name} token, event category mismatch"
                )))
            }
        };

        let partial = self.top()?.current_block.as_mut().unwrap();
        partial.events.push(ResolvedEvent {
            kind,
            start_stage,
            end_stage,
        });
        partial.next_event_index += 1;
        let done = partial.next_event_index >= block.events.len();

        if done {
            self.finish_current_block()?;
        }
        Ok(())
    }

    fn stream(&self, channel_id: u32) -> Result<Arc<Stream>, CoreError> {
        self.streams
            .iter()
            .find(|s| s.id == channel_id)
            .cloned()
            .ok_or_else(|| CoreError::ProtocolViolation(format!("unknown stream {channel_id}")))
    }

    fn axi_interface(&self, interface_id: u32, _addr_hint: u64) -> Result<Arc<AxiInterface>, CoreError> {
        self.axi_interfaces
            .iter()
            .find(|i| i.id == interface_id)
            .cloned()
            .ok_or_else(|| CoreError::ProtocolViolation(format!("unknown AXI interface {interface_id}")))
    }

    fn finish_current_block(&mut self) -> Result<(), CoreError> {
        let block_id_for_loop_advance = {
            let frame = self.top()?;
            let partial = frame
                .current_block
                .take()
                .expect("finish_current_block called with no current block");
            let terminator = partial.block.terminator;
            let block_id = partial.block.id;
            frame.trace.push(ResolvedBlock {
                block: partial.block,
                start_stage: partial.start_stage,
                end_stage: partial.end_stage,
                events: partial.events,
            });
            if terminator == Terminator::Ret {
                frame.pending_pop = true;
            }
            block_id
        };
        self.advance_loop_index_if_wrapping(block_id_for_loop_advance)?;

        // Flush a deferred pop: it's safe exactly when the frame we'd pop
        // has no call event still awaiting its callee's first `trace_bb`.
        // Because a `call` event always immediately pushes the callee frame
        // (see `absorb_event`), "awaiting" means this frame itself would have
        // to be that not-yet-visited callee, which can't be true once we've
        // just finished one of its own blocks. So a pending pop is always
        // flushable once control returns here with no new frame on top.
        if self.top()?.pending_pop && !self.top()?.current_block.is_some() {
            self.pop_frame()?;
        }
        Ok(())
    }

    fn pop_frame(&mut self) -> Result<(), CoreError> {
        let finished = self.stack.pop().expect("pop_frame called on empty stack");
        if self.stack.is_empty() {
            self.finished = Some(finished.trace);
            return Ok(());
        }
        let parent = self.stack.last_mut().unwrap();
        // The call event that spawned this frame is always still sitting in
        // the parent's open block: nothing else gets processed on the parent
        // while one of its callees is on top of the stack, so the block
        // never finishes (and never flushes to `parent.trace`) in between.
        let call_event = parent
            .current_block
            .as_mut()
            .and_then(|p| p.events.iter_mut().rev().find(|e| is_placeholder_call(e)))
            .ok_or_else(|| {
                CoreError::InvariantViolated("no placeholder call event to attach finished subcall to".into())
            })?;
        if let ResolvedEventKind::Call { subcall, .. } = &mut call_event.kind {
            *subcall = Arc::new(finished.trace);
        }

        // Now that the callee is attached, the parent's own deferred pop (if
        // any) may become flushable.
        if parent.pending_pop && parent.current_block.is_none() {
            self.pop_frame()?;
        }
        Ok(())
    }
}

fn is_placeholder_call(e: &ResolvedEvent) -> bool {
    matches!(&e.kind, ResolvedEventKind::Call { subcall, .. } if subcall.is_empty())
}

/// Total number of resolved events across the whole tree, including `call`
/// events (every event occupies one slot in some frame's event groups and
/// therefore contributes one unit of unstall progress, `spec.md` §9).
fn count_events(blocks: &[ResolvedBlock]) -> usize {
    blocks
        .iter()
        .map(|b| {
            b.events
                .iter()
                .map(|e| match &e.kind {
                    ResolvedEventKind::Call { subcall, .. } => 1 + count_events(subcall),
                    _ => 1,
                })
                .sum::<usize>()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::plain_block;
    use std::collections::HashMap;

    fn sequential_model() -> Model {
        let b0 = plain_block(0, "b0", 0, 5, Terminator::Other);
        let b1 = plain_block(1, "b1", 5, 8, Terminator::Ret);
        let function = Arc::new(Function {
            name: "top".into(),
            basic_blocks: vec![b0, b1],
            is_dataflow: false,
        });
        let mut functions = HashMap::new();
        functions.insert("top".to_string(), function);
        Model { functions }
    }

    #[test]
    fn sequential_two_blocks_reaches_stage_8() {
        let model = sequential_model();
        let trace_text = "trace_bb\ttop\t0\ntrace_bb\ttop\t1\n";
        let mut resolver = Resolver::new(&model, trace_text);
        let done = resolver.run_one_slice(Instant::now() + std::time::Duration::from_secs(1)).unwrap();
        assert!(done);
        let resolved = resolver.finish().unwrap();
        assert_eq!(resolved.top.len(), 2);
        assert_eq!(resolved.top[0].start_stage, 0);
        assert_eq!(resolved.top[0].end_stage, 5);
        assert_eq!(resolved.top[1].start_stage, 5);
        assert_eq!(resolved.top[1].end_stage, 8);
    }

    #[test]
    fn empty_trace_is_kernel_did_not_run() {
        let model = sequential_model();
        let mut resolver = Resolver::new(&model, "");
        let err = resolver
            .run_one_slice(Instant::now() + std::time::Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, CoreError::KernelDidNotRun));
    }
}
