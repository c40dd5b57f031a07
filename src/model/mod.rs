//! Static CDFG model.
//!
//! Everything in this module is produced elsewhere (parsing the HLS schedule
//! database, CDFG XML, or LLVM bitcode is explicitly out of scope here — see
//! `spec.md` §1/§2) and handed to the resolver by value. These types only
//! capture the shape of that static data, already reduced to the handful of
//! fields the resolver and simulator actually consult.

use std::collections::HashMap;
use std::sync::Arc;

/// A parsed HLS design: one [`Function`] per kernel/subroutine.
#[derive(Debug, Default)]
pub struct Model {
    pub functions: HashMap<String, Arc<Function>>,
}

impl Model {
    pub fn function(&self, name: &str) -> Option<&Arc<Function>> {
        self.functions.get(name)
    }
}

/// A single HLS function: its static schedule of basic blocks.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    /// Indexed by the LLVM basic block index carried in `trace_bb`/`loop_bb` tokens.
    pub basic_blocks: Vec<Arc<BasicBlock>>,
    /// Whether the function's top-level region is a dataflow region (used for
    /// `ap_continue` sink propagation, `spec.md` §4.2.6).
    pub is_dataflow: bool,
}

/// The kind of schedule region a basic block belongs to. `None` means the block
/// is in ordinary sequential (FSM) control flow.
#[derive(Debug, Clone)]
pub enum RegionKind {
    Sequential,
    Pipeline(Arc<PipelineRegion>),
    Dataflow,
}

impl RegionKind {
    pub fn pipeline(&self) -> Option<&Arc<PipelineRegion>> {
        match self {
            RegionKind::Pipeline(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_dataflow(&self) -> bool {
        matches!(self, RegionKind::Dataflow)
    }
}

/// Identity of a pipelined loop region. Two basic blocks share a pipeline
/// region iff they carry the same `Arc` (compared by pointer/id, never by `ii`
/// alone — two distinct loops can share an II).
#[derive(Debug)]
pub struct PipelineRegion {
    pub id: u64,
    pub ii: i64,
}

impl PartialEq for PipelineRegion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for PipelineRegion {}

/// A basic block's static schedule info, as consumed by the resolver.
#[derive(Debug)]
pub struct BasicBlock {
    pub name: String,
    /// Static FSM start stage, relative to the enclosing frame's basic-block
    /// numbering (see `spec.md` §3, "Stage vs. cycle").
    pub start: i64,
    pub end: i64,
    pub terminator: Terminator,
    /// The region this block is scheduled in.
    pub region: RegionKind,
    /// The block's static event instructions, in emission order.
    pub events: Vec<Instruction>,
    /// Globally unique id, used for `blocks_seen` membership tracking without
    /// requiring pointer identity.
    pub id: u64,
}

impl BasicBlock {
    pub fn length(&self) -> i64 {
        self.end - self.start
    }

    pub fn pipeline(&self) -> Option<&Arc<PipelineRegion>> {
        self.region.pipeline()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Ret,
    Other,
}

/// A static event instruction within a basic block.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub opcode: Opcode,
    /// Stage offset relative to the owning block's start, per `spec.md` §4.1.2.
    pub relative_start: i64,
    pub relative_end: i64,
    /// Populated by the external model for `Opcode::Call` instructions only;
    /// `None` for every other opcode.
    pub callee: Option<CalleeInfo>,
}

/// Static information the external model attaches to a `call` instruction.
#[derive(Debug, Clone)]
pub struct CalleeInfo {
    pub function: Arc<Function>,
    /// True when the callee is a dataflow process with no outgoing channels
    /// (`spec.md` §4.2.6, GLOSSARY "Sink process"). Supplied by the external
    /// model — see `original_source/backend/lightningsim/model/dataflow.py`.
    pub is_dataflow_sink: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Call,
    FifoRead,
    FifoWrite,
    AxiReadReq,
    AxiWriteReq,
    AxiRead,
    AxiWrite,
    AxiWriteResp,
}

impl Opcode {
    /// Category name used in `ProtocolViolation` messages and to validate a
    /// trace token against the static instruction it's supposed to satisfy.
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Call => "call",
            Opcode::FifoRead => "fifo_read",
            Opcode::FifoWrite => "fifo_write",
            Opcode::AxiReadReq => "axi_readreq",
            Opcode::AxiWriteReq => "axi_writereq",
            Opcode::AxiRead => "axi_read",
            Opcode::AxiWrite => "axi_write",
            Opcode::AxiWriteResp => "axi_writeresp",
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Build a minimal single-block, event-free function: useful as scaffolding
    /// for resolver/simulator unit tests that don't care about the block's
    /// internals beyond its stage range.
    pub fn plain_block(id: u64, name: &str, start: i64, end: i64, terminator: Terminator) -> Arc<BasicBlock> {
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

    #[test]
    fn pipeline_identity_is_by_id() {
        let a = Arc::new(PipelineRegion { id: 1, ii: 2 });
        let b = Arc::new(PipelineRegion { id: 1, ii: 2 });
        let c = Arc::new(PipelineRegion { id: 2, ii: 2 });
        assert_eq!(*a, *b);
        assert_ne!(*a, *c);
    }
}
