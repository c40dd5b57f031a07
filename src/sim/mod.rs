//! Event-driven simulation: per-frame virtual clocks advanced by a single
//! global earliest-unstall rule, `spec.md` §4.2.

pub mod axi;
pub mod fifo;
pub mod params;
pub mod result;

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{BlockedFrameInfo, CoreError, DeadlockReport, FifoSnapshot};
use crate::resolve::{ResolvedBlock, ResolvedEvent, ResolvedEventKind, ResolvedTrace};
use axi::{AxiInterfaceState, AXI_READ_OVERHEAD, AXI_WRITE_OVERHEAD};
use fifo::FifoState;
pub use params::{FifoDepth, SimParams};
pub use result::{ModuleResult, SimulationResult};

const SAXI_STATUS_UPDATE_OVERHEAD: i64 = 5;
const SAXI_STATUS_READ_DELAY: i64 = 5;
const SAXI_STATUS_WRITE_DELAY: i64 = 6;

/// One event's position within its frame's stage-keyed event groups.
#[derive(Debug, Clone)]
struct StallSlot {
    event_index: usize,
    kind: StallKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StallKind {
    Call,
    FifoRead,
    FifoWrite,
    AxiReadReq,
    AxiWriteReq,
    AxiRead,
    AxiWrite,
    AxiWriteResp,
}

#[derive(Debug, Clone, Default)]
struct EventGroup {
    stage: i64,
    subcalls: Vec<usize>,
    stalls: Vec<usize>,
}

/// Precomputed, flattened view of one frame's resolved events, grouped by the
/// stage at which each becomes relevant (`spec.md` §4.2, "event iterator").
struct FrameEvents {
    flat: Vec<ResolvedEvent>,
    groups: Vec<EventGroup>,
    end_stage: i64,
}

impl FrameEvents {
    fn build(blocks: &[ResolvedBlock]) -> Self {
        let mut flat = Vec::new();
        for block in blocks {
            flat.extend(block.events.iter().cloned());
        }
        let end_stage = blocks.last().map(|b| b.end_stage).unwrap_or(0);

        let mut by_stage: BTreeMap<i64, EventGroup> = BTreeMap::new();
        for (idx, event) in flat.iter().enumerate() {
            let (key_stage, slot) = match &event.kind {
                ResolvedEventKind::Call { .. } => (event.start_stage, StallSlot { event_index: idx, kind: StallKind::Call }),
                ResolvedEventKind::AxiReadReq { .. } => (
                    event.start_stage,
                    StallSlot { event_index: idx, kind: StallKind::AxiReadReq },
                ),
                ResolvedEventKind::AxiWriteReq { .. } => (
                    event.start_stage,
                    StallSlot { event_index: idx, kind: StallKind::AxiWriteReq },
                ),
                ResolvedEventKind::FifoRead(_) => (
                    event.end_stage,
                    StallSlot { event_index: idx, kind: StallKind::FifoRead },
                ),
                ResolvedEventKind::FifoWrite(_) => (
                    event.end_stage,
                    StallSlot { event_index: idx, kind: StallKind::FifoWrite },
                ),
                ResolvedEventKind::AxiRead { .. } => (
                    event.end_stage,
                    StallSlot { event_index: idx, kind: StallKind::AxiRead },
                ),
                ResolvedEventKind::AxiWrite { .. } => (
                    event.end_stage,
                    StallSlot { event_index: idx, kind: StallKind::AxiWrite },
                ),
                ResolvedEventKind::AxiWriteResp { .. } => (
                    event.end_stage,
                    StallSlot { event_index: idx, kind: StallKind::AxiWriteResp },
                ),
            };
            let group = by_stage.entry(key_stage).or_insert_with(|| EventGroup {
                stage: key_stage,
                ..Default::default()
            });
            // A call both triggers a spawn (`subcalls`) and gates this
            // frame's advancement past the group until the callee is done
            // (`stalls` — see the `Call` arm of `unstallable_at`).
            if slot.kind == StallKind::Call {
                group.subcalls.push(slot.event_index);
            }
            group.stalls.push(slot.event_index);
        }

        let groups = by_stage.into_values().collect();
        Self { flat, groups, end_stage }
    }
}

/// One active call frame's virtual clock and per-stall-group bookkeeping.
pub struct Simulator {
    pub name: Arc<str>,
    pub cycle: i64,
    pub start_cycle: i64,
    stage: i64,
    next_group: usize,
    events: FrameEvents,
    pub subcalls: BTreeMap<usize, Simulator>,
    cycle_map: Vec<(i64, i64)>,
    pub done: bool,
    pub creation_index: u64,
}

impl Simulator {
    /// Builds a frame and returns, alongside it, the spawns due for its very
    /// first event group. `step()` only ever looks at the group it is
    /// *entering*, so group 0 needs this one-time collection at construction
    /// time — there is no preceding `step()` call to have done it.
    fn new(name: Arc<str>, blocks: &[ResolvedBlock], start_cycle: i64, creation_index: u64) -> (Self, Vec<(usize, i64)>) {
        let events = FrameEvents::build(blocks);
        // A frame with no stall-worthy events at all never gets a `step()`
        // call (nothing ever appears in `collect_active_paths`), so it must
        // jump straight to its final stage here instead of sitting at
        // `start_cycle` forever.
        let end_stage = events.end_stage;
        let no_events = events.groups.is_empty();
        let sim = Self {
            name,
            cycle: if no_events { start_cycle + end_stage } else { start_cycle },
            start_cycle,
            stage: if no_events { end_stage } else { 0 },
            next_group: 0,
            events,
            subcalls: BTreeMap::new(),
            cycle_map: Vec::new(),
            done: no_events,
            creation_index,
        };
        let initial_spawns = if no_events { Vec::new() } else { sim.group_spawns(0) };
        (sim, initial_spawns)
    }

    fn current_group(&self) -> Option<&EventGroup> {
        self.events.groups.get(self.next_group)
    }

    pub fn current_stalls(&self) -> &[usize] {
        self.current_group().map(|g| g.stalls.as_slice()).unwrap_or(&[])
    }

    fn event(&self, idx: usize) -> &ResolvedEvent {
        &self.events.flat[idx]
    }

    fn group_spawns(&self, group_idx: usize) -> Vec<(usize, i64)> {
        let mut spawns = Vec::new();
        if let Some(group) = self.events.groups.get(group_idx) {
            for &idx in &group.subcalls {
                if let ResolvedEventKind::Call { callee_is_sequential, .. } = &self.event(idx).kind {
                    let start_delay = if *callee_is_sequential { 1 } else { 0 };
                    spawns.push((idx, start_delay));
                }
            }
        }
        spawns
    }

    /// Advances past the current event group, per `spec.md` §4.2.1. Returns
    /// the indices (into `self.events.flat`) of calls to spawn in the new
    /// group, each paired with its start_delay.
    fn step(&mut self) -> Vec<(usize, i64)> {
        let stage_start = self.resolve_stage_start(self.stage);
        if self.cycle != stage_start {
            self.cycle_map.push((self.stage, self.cycle));
        }

        self.next_group += 1;
        let new_stage = match self.current_group() {
            Some(g) => g.stage,
            None => {
                self.done = true;
                self.events.end_stage
            }
        };
        self.cycle += new_stage - self.stage;
        self.stage = new_stage;

        self.group_spawns(self.next_group)
    }

    pub fn resolve_stage_start(&self, stage: i64) -> i64 {
        match self.cycle_map.iter().rev().find(|(s, _)| *s <= stage) {
            Some((s, c)) => c + (stage - s),
            None => self.start_cycle + stage,
        }
    }

    pub fn resolve_stage_end(&self, stage: i64) -> i64 {
        self.resolve_stage_start(stage + 1) - 1
    }
}

/// Mutable shared resources (FIFOs, AXI interfaces) owned exclusively by one
/// [`Simulation`].
struct World {
    fifos: HashMap<u32, FifoState>,
    axis: HashMap<u32, AxiInterfaceState>,
}

impl World {
    fn new(resolved: &ResolvedTrace, params: &SimParams) -> Self {
        let mut fifos = HashMap::new();
        for stream in &resolved.streams {
            let declared = resolved.channel_depths.get(&stream.id).copied();
            let default = declared.map(FifoDepth::Bounded).unwrap_or(FifoDepth::Unbounded);
            let depth = params.fifo_depth(stream.id, default);
            fifos.insert(stream.id, FifoState::new(depth.as_option()));
        }
        let mut axis = HashMap::new();
        for iface in &resolved.axi_interfaces {
            let declared = resolved.axi_latencies.get(&iface.id).copied().unwrap_or(1);
            let latency = params.axi_delay(iface.address, declared);
            axis.insert(iface.id, AxiInterfaceState::new(latency));
        }
        Self { fifos, axis }
    }

    fn tick(&mut self, cycle: i64) {
        for fifo in self.fifos.values_mut() {
            fifo.tick();
        }
        for axi in self.axis.values_mut() {
            axi.tick(cycle);
        }
    }
}

/// Outcome of `unstallable_at` for one frame.
enum Readiness {
    Blocked,
    Ready(i64),
}

/// A full simulation of one resolved trace under one parameter set.
pub struct Simulation {
    world: World,
    pub top: Simulator,
    creation_counter: u64,
    total_stall_events: usize,
    unstall_count: usize,
    is_ap_ctrl_chain: bool,
    ap_ctrl_chain_top_port_count: usize,
}

impl Simulation {
    pub fn new(resolved: &ResolvedTrace, params: &SimParams) -> Result<Self, CoreError> {
        if resolved.top.is_empty() {
            return Err(CoreError::KernelDidNotRun);
        }
        let world = World::new(resolved, params);
        let mut creation_counter = 1u64;
        let top = materialize_simulator(Arc::from("top"), &resolved.top, 0, &mut creation_counter);
        Ok(Self {
            world,
            top,
            creation_counter,
            total_stall_events: resolved.num_stall_events.max(1),
            unstall_count: 0,
            is_ap_ctrl_chain: resolved.is_ap_ctrl_chain,
            ap_ctrl_chain_top_port_count: params.ap_ctrl_chain_top_port_count().unwrap_or(0),
        })
    }

    pub fn progress(&self) -> f64 {
        (self.unstall_count as f64 / self.total_stall_events as f64).min(1.0)
    }

    /// Runs until the top frame is done (or the deadline elapses). Returns
    /// `true` when the simulation has fully completed.
    pub fn run_one_slice(&mut self, deadline: Instant) -> Result<bool, CoreError> {
        while !self.top.done {
            if Instant::now() >= deadline {
                return Ok(false);
            }
            self.advance_one()?;
        }
        Ok(true)
    }

    pub fn run(&mut self) -> Result<(), CoreError> {
        loop {
            if self.run_one_slice(Instant::now() + std::time::Duration::from_secs(3600))? {
                return Ok(());
            }
        }
    }

    /// One outer iteration of the global unstall rule, `spec.md` §4.2.2.
    fn advance_one(&mut self) -> Result<(), CoreError> {
        let mut readiness: Vec<(Vec<usize>, i64)> = Vec::new();
        self.collect_active_paths(&mut Vec::new(), &mut readiness)?;

        let earliest = readiness.iter().map(|(_, c)| *c).min();
        let Some(earliest) = earliest else {
            let report = self.build_deadlock_report(&readiness);
            warn!(frames = report.blocked_frames.len(), "deadlock detected");
            return Err(CoreError::Deadlock(Box::new(report)));
        };

        // Barrier-raise: no active frame may sit at a cycle earlier than the
        // chosen unstall point.
        self.raise_all(&mut Vec::new(), earliest);

        let chosen: Vec<Vec<usize>> = readiness
            .into_iter()
            .filter(|(_, c)| *c == earliest)
            .map(|(path, _)| path)
            .collect();

        for path in &chosen {
            self.apply_unstall(path, earliest)?;
        }

        self.world.tick(earliest);
        debug!(cycle = earliest, frames = chosen.len(), "global unstall");
        self.unstall_count += chosen.len();
        Ok(())
    }

    fn get_mut(&mut self, path: &[usize]) -> &mut Simulator {
        let mut sim = &mut self.top;
        for &idx in path {
            sim = sim.subcalls.get_mut(&idx).expect("path refers to a live subcall");
        }
        sim
    }

    fn get(&self, path: &[usize]) -> &Simulator {
        let mut sim = &self.top;
        for &idx in path {
            sim = sim.subcalls.get(&idx).expect("path refers to a live subcall");
        }
        sim
    }

    /// Recursively walks active (non-done) frames, computing
    /// `unstallable_at` for each and appending `(path, cycle)` when ready.
    /// Done frames are pruned: a parent can only become done once every
    /// child it spawned is itself done (a call stall gates on `sub.done`),
    /// so no live work remains beneath a done frame.
    fn collect_active_paths(
        &self,
        path: &mut Vec<usize>,
        out: &mut Vec<(Vec<usize>, i64)>,
    ) -> Result<(), CoreError> {
        let sim = self.get(path);
        if sim.done {
            return Ok(());
        }
        for &child_idx in sim.subcalls.keys() {
            path.push(child_idx);
            self.collect_active_paths(path, out)?;
            path.pop();
        }
        match self.unstallable_at(sim)? {
            Readiness::Ready(cycle) => out.push((path.clone(), cycle)),
            Readiness::Blocked => {}
        }
        Ok(())
    }

    fn raise_all(&mut self, path: &mut Vec<usize>, floor: i64) {
        let sim = self.get_mut(path);
        if sim.done {
            return;
        }
        sim.cycle = sim.cycle.max(floor);
        let children: Vec<usize> = sim.subcalls.keys().copied().collect();
        for child_idx in children {
            path.push(child_idx);
            self.raise_all(path, floor);
            path.pop();
        }
    }

    fn unstallable_at(&self, sim: &Simulator) -> Result<Readiness, CoreError> {
        let stalls = sim.current_stalls();
        if stalls.is_empty() {
            // No stall events in this group: it can always proceed immediately.
            return Ok(Readiness::Ready(sim.cycle));
        }
        let mut earliest = sim.cycle;
        for &idx in stalls {
            let event = sim.event(idx);
            let cycle = match &event.kind {
                ResolvedEventKind::Call { .. } => {
                    let Some(child) = sim.subcalls.get(&idx) else {
                        return Ok(Readiness::Blocked);
                    };
                    if !child.done {
                        return Ok(Readiness::Blocked);
                    }
                    sim.cycle.max(child.cycle)
                }
                ResolvedEventKind::FifoWrite(stream) => {
                    let fifo = &self.world.fifos[&stream.id];
                    match fifo.writable_at() {
                        Some(c) => sim.cycle.max(c),
                        None => return Ok(Readiness::Blocked),
                    }
                }
                ResolvedEventKind::FifoRead(stream) => {
                    let fifo = &self.world.fifos[&stream.id];
                    match fifo.readable_at() {
                        Some(c) => sim.cycle.max(c),
                        None => return Ok(Readiness::Blocked),
                    }
                }
                ResolvedEventKind::AxiRead { interface, .. } => {
                    let axi = &self.world.axis[&interface.id];
                    match axi.oldest_active_read_cycle() {
                        Some(req_cycle) => {
                            sim.cycle.max(req_cycle + axi.latency.max(1) + AXI_READ_OVERHEAD)
                        }
                        None => return Ok(Readiness::Blocked),
                    }
                }
                ResolvedEventKind::AxiWriteResp { interface } => {
                    let axi = &self.world.axis[&interface.id];
                    match axi.last_write_completion_cycle() {
                        Some(completion_cycle) => {
                            sim.cycle.max(completion_cycle + axi.latency.max(1) + AXI_WRITE_OVERHEAD)
                        }
                        None => return Ok(Readiness::Blocked),
                    }
                }
                ResolvedEventKind::AxiReadReq { .. }
                | ResolvedEventKind::AxiWriteReq { .. }
                | ResolvedEventKind::AxiWrite { .. } => sim.cycle,
            };
            earliest = earliest.max(cycle);
        }
        Ok(Readiness::Ready(earliest))
    }

    /// Applies every stall's side effect for the frame at `path` (§4.2.3),
    /// then advances it past the current event group.
    fn apply_unstall(&mut self, path: &[usize], cycle: i64) -> Result<(), CoreError> {
        let stalls: Vec<usize> = self.get(path).current_stalls().to_vec();
        for idx in stalls {
            let kind = self.get(path).event(idx).kind.clone();
            self.apply_side_effect(&kind, cycle)?;
        }

        let spawns = self.get_mut(path).step();
        for (idx, start_delay) in spawns {
            let sim = self.get(path);
            let ResolvedEventKind::Call { subcall, function_name, .. } = &sim.event(idx).kind else {
                unreachable!("subcalls list only contains call events")
            };
            let child_name = function_name.clone();
            let child_blocks = subcall.clone();
            let child_start = sim.cycle + start_delay;
            let child = materialize_simulator(child_name, &child_blocks, child_start, &mut self.creation_counter);
            self.get_mut(path).subcalls.insert(idx, child);
        }
        Ok(())
    }

    fn apply_side_effect(&mut self, kind: &ResolvedEventKind, cycle: i64) -> Result<(), CoreError> {
        match kind {
            ResolvedEventKind::FifoWrite(stream) => {
                self.world.fifos.get_mut(&stream.id).unwrap().write(cycle);
            }
            ResolvedEventKind::FifoRead(stream) => {
                self.world.fifos.get_mut(&stream.id).unwrap().read(cycle);
            }
            ResolvedEventKind::AxiReadReq { interface, offset, length } => {
                self.world
                    .axis
                    .get_mut(&interface.id)
                    .unwrap()
                    .issue_read_req(cycle, *offset, *length);
            }
            ResolvedEventKind::AxiWriteReq { interface, offset, length } => {
                self.world
                    .axis
                    .get_mut(&interface.id)
                    .unwrap()
                    .issue_write_req(cycle, *offset, *length);
            }
            ResolvedEventKind::AxiRead { interface, length } => {
                self.world.axis.get_mut(&interface.id).unwrap().consume_read(*length);
            }
            ResolvedEventKind::AxiWrite { interface, length } => {
                self.world
                    .axis
                    .get_mut(&interface.id)
                    .unwrap()
                    .consume_write(*length, cycle);
            }
            ResolvedEventKind::AxiWriteResp { interface } => {
                self.world
                    .axis
                    .get_mut(&interface.id)
                    .unwrap()
                    .consume_writeresp()
                    .ok_or(CoreError::MissingAxiRequest {
                        interface_address: interface.address,
                        operation: "writeresp",
                    })?;
            }
            ResolvedEventKind::Call { .. } => {}
        }
        Ok(())
    }

    fn build_deadlock_report(&self, attempted: &[(Vec<usize>, i64)]) -> DeadlockReport {
        let _ = attempted;
        let mut blocked_frames = Vec::new();
        self.collect_blocked(&mut Vec::new(), &mut blocked_frames);
        let fifo_snapshot = self
            .world
            .fifos
            .iter()
            .map(|(id, fifo)| FifoSnapshot {
                channel_id: *id,
                occupancy: fifo.occupancy(),
                depth: fifo.depth.unwrap_or(usize::MAX),
            })
            .collect();
        DeadlockReport {
            top_frame_path: Vec::new(),
            blocked_frames,
            fifo_snapshot,
        }
    }

    fn collect_blocked(&self, path: &mut Vec<usize>, out: &mut Vec<BlockedFrameInfo>) {
        let sim = self.get(path);
        if sim.done {
            return;
        }
        for &child_idx in sim.subcalls.keys() {
            path.push(child_idx);
            self.collect_blocked(path, out);
            path.pop();
        }
        if matches!(self.unstallable_at(sim), Ok(Readiness::Blocked)) {
            out.push(BlockedFrameInfo {
                path: path.clone(),
                waiting_on: sim
                    .current_stalls()
                    .first()
                    .map(|&idx| stall_description(&sim.event(idx).kind))
                    .unwrap_or_else(|| "unknown".to_string()),
                stage: sim.stage,
            });
        }
    }

    /// Computes the `ap_continue` handshake cycle (§4.2.6) once the top frame
    /// is done, optionally propagated to dataflow sink processes.
    pub fn ap_continue_cycle(&self) -> Option<i64> {
        if !self.is_ap_ctrl_chain {
            return None;
        }
        let cycle = self.top.cycle;
        let n = self.ap_ctrl_chain_top_port_count as i64;
        let read_interval = SAXI_STATUS_UPDATE_OVERHEAD + n + 1;
        let ap_done_read_cycle =
            div_ceil_i64(cycle - SAXI_STATUS_READ_DELAY, read_interval) * read_interval + SAXI_STATUS_READ_DELAY;
        Some(ap_done_read_cycle + SAXI_STATUS_WRITE_DELAY)
    }

    pub fn observed_fifo_depths(&self) -> HashMap<u32, usize> {
        self.world.fifos.iter().map(|(id, f)| (*id, f.observed_depth())).collect()
    }

    /// Builds the final [`SimulationResult`] tree. Must be called only after
    /// the simulation has run to completion (`self.top.done`).
    pub fn build_result(&self) -> SimulationResult {
        let ap_continue_cycle = self.ap_continue_cycle();
        let sink_creation_indices: std::collections::HashSet<u64> = match ap_continue_cycle {
            Some(_) => self
                .top
                .last_group_sink_call_indices()
                .iter()
                .filter_map(|&idx| self.top.subcalls.get(&idx))
                .map(|child| child.creation_index)
                .collect(),
            None => std::collections::HashSet::new(),
        };
        let top_module = build_module_result(&self.top, ap_continue_cycle, &sink_creation_indices);
        SimulationResult {
            top_module,
            observed_fifo_depths: self.observed_fifo_depths(),
            ap_continue_cycle,
        }
    }
}

/// Builds a [`Simulator`] and recursively spawns every callee that is ready
/// to start in its very first event group, so that group-0 calls aren't lost
/// to the "spawns come from `step()`" rule (`step()` only ever fires once a
/// frame has advanced past its starting group).
fn materialize_simulator(
    name: Arc<str>,
    blocks: &[ResolvedBlock],
    start_cycle: i64,
    creation_counter: &mut u64,
) -> Simulator {
    let creation_index = *creation_counter;
    *creation_counter += 1;
    let (mut sim, spawns) = Simulator::new(name, blocks, start_cycle, creation_index);
    for (idx, start_delay) in spawns {
        let ResolvedEventKind::Call { subcall, function_name, .. } = &sim.event(idx).kind else {
            unreachable!("group_spawns only yields call events")
        };
        let child_name = function_name.clone();
        let child_blocks = subcall.clone();
        let child_start = sim.cycle + start_delay;
        let child = materialize_simulator(child_name, &child_blocks, child_start, creation_counter);
        sim.subcalls.insert(idx, child);
    }
    sim
}

fn build_module_result(
    sim: &Simulator,
    ap_continue_cycle: Option<i64>,
    sink_creation_indices: &std::collections::HashSet<u64>,
) -> ModuleResult {
    let mut end_cycle = sim.cycle;
    if sink_creation_indices.contains(&sim.creation_index) {
        if let Some(cycle) = ap_continue_cycle {
            end_cycle = end_cycle.max(cycle);
        }
    }
    ModuleResult {
        name: sim.name.to_string(),
        start_cycle: sim.start_cycle,
        end_cycle,
        children: sim
            .subcalls
            .values()
            .map(|c| build_module_result(c, ap_continue_cycle, sink_creation_indices))
            .collect(),
    }
}

impl Simulator {
    /// Call-event indices in the last event group whose callee is a dataflow
    /// sink process (`spec.md` §4.2.6).
    fn last_group_sink_call_indices(&self) -> Vec<usize> {
        let Some(group) = self.events.groups.last() else {
            return Vec::new();
        };
        group
            .subcalls
            .iter()
            .copied()
            .filter(|&idx| matches!(&self.event(idx).kind, ResolvedEventKind::Call { is_dataflow_sink: true, .. }))
            .collect()
    }
}

/// `⌈a/b⌉` for signed operands. Rust's `/`/`%` truncate toward zero, so a
/// plain "round up when there's a remainder" check over-rounds negative
/// quotients (e.g. `-5 % 9 != 0` would otherwise push `-5/9` from `0` up to
/// `1`, when `⌈-5/9⌉` is actually `0`). Only round away from zero when the
/// remainder's sign matches the divisor's.
fn div_ceil_i64(a: i64, b: i64) -> i64 {
    let d = a / b;
    let r = a % b;
    if r != 0 && (r > 0) == (b > 0) {
        d + 1
    } else {
        d
    }
}

fn stall_description(kind: &ResolvedEventKind) -> String {
    match kind {
        ResolvedEventKind::Call { function_name, .. } => format!("call to {function_name}"),
        ResolvedEventKind::FifoRead(s) => format!("fifo_read on stream {}", s.id),
        ResolvedEventKind::FifoWrite(s) => format!("fifo_write on stream {}", s.id),
        ResolvedEventKind::AxiReadReq { interface, .. } => format!("axi_readreq on interface {}", interface.id),
        ResolvedEventKind::AxiWriteReq { interface, .. } => format!("axi_writereq on interface {}", interface.id),
        ResolvedEventKind::AxiRead { interface, .. } => format!("axi_read on interface {}", interface.id),
        ResolvedEventKind::AxiWrite { interface, .. } => format!("axi_write on interface {}", interface.id),
        ResolvedEventKind::AxiWriteResp { interface } => format!("axi_writeresp on interface {}", interface.id),
    }
}
