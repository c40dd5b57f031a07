//! Simulation parameter surface, `spec.md` §6.2.

use std::collections::HashMap;

/// A stream's configured queue depth. `Unbounded` makes the channel behave
/// like an always-shift-register-delay FIFO (see `fifo::FifoState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FifoDepth {
    Bounded(usize),
    Unbounded,
}

impl FifoDepth {
    pub fn as_option(self) -> Option<usize> {
        match self {
            FifoDepth::Bounded(d) => Some(d),
            FifoDepth::Unbounded => None,
        }
    }
}

/// User-supplied knobs for one simulation run: FIFO depth overrides, AXI
/// interface latencies, and the `ap_ctrl_chain` top-level port count.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    fifo_depths: HashMap<u32, FifoDepth>,
    axi_delays: HashMap<u64, i64>,
    ap_ctrl_chain_top_port_count: Option<usize>,
}

impl SimParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fifo_depth(mut self, stream_id: u32, depth: FifoDepth) -> Self {
        self.fifo_depths.insert(stream_id, depth);
        self
    }

    pub fn with_axi_delay(mut self, interface_address: u64, cycles: i64) -> Self {
        self.axi_delays.insert(interface_address, cycles);
        self
    }

    pub fn with_ap_ctrl_chain_top_port_count(mut self, count: usize) -> Self {
        self.ap_ctrl_chain_top_port_count = Some(count);
        self
    }

    pub fn fifo_depth(&self, stream_id: u32, default: FifoDepth) -> FifoDepth {
        self.fifo_depths.get(&stream_id).copied().unwrap_or(default)
    }

    pub fn axi_delay(&self, interface_address: u64, default: i64) -> i64 {
        self.axi_delays.get(&interface_address).copied().unwrap_or(default)
    }

    pub fn ap_ctrl_chain_top_port_count(&self) -> Option<usize> {
        self.ap_ctrl_chain_top_port_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_take_effect() {
        let params = SimParams::new()
            .with_fifo_depth(0, FifoDepth::Bounded(4))
            .with_axi_delay(0x1000, 30);
        assert_eq!(params.fifo_depth(0, FifoDepth::Bounded(2)).as_option(), Some(4));
        assert_eq!(params.fifo_depth(1, FifoDepth::Bounded(2)).as_option(), Some(2));
        assert_eq!(params.axi_delay(0x1000, 20), 30);
        assert_eq!(params.axi_delay(0x2000, 20), 20);
    }
}
