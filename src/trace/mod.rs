//! Trace tokens: the raw, line-oriented record emitted by the HLS
//! co-simulation kernel. Parsing (tab-separated fields, interning of stream
//! and AXI interface descriptors) lives here; folding tokens against the
//! static CDFG is the resolver's job (`crate::resolve`).

use std::collections::HashMap;

use crate::error::CoreError;

/// A FIFO/stream channel, identified by its hardware address. Two `Stream`s
/// are equal iff their addresses match — `name`/`id` are informational only,
/// mirroring `original_source/backend/lightningsim/trace_file.py`'s frozen
/// `Stream` dataclass (`eq=False` fields for name/id).
#[derive(Debug, Clone)]
pub struct Stream {
    pub address: u64,
    pub name: String,
    pub id: u32,
}

impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}
impl Eq for Stream {}

/// An AXI master interface, identified by its base address. Interfaces are
/// kept sorted by address so a request token's address can be resolved to its
/// owning interface by binary search, as the original does.
#[derive(Debug, Clone)]
pub struct AxiInterface {
    pub address: u64,
    pub name: String,
    pub id: u32,
}

impl PartialEq for AxiInterface {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}
impl Eq for AxiInterface {}

/// Look up the AXI interface a request address falls under: the greatest
/// interface whose base address is `<= addr`.
pub fn find_axi_interface(interfaces: &[AxiInterface], addr: u64) -> Option<&AxiInterface> {
    match interfaces.binary_search_by(|iface| iface.address.cmp(&addr)) {
        Ok(idx) => Some(&interfaces[idx]),
        Err(0) => None,
        Err(idx) => Some(&interfaces[idx - 1]),
    }
}

/// One raw trace token. Field names match the grammar in `spec.md` §3.
#[derive(Debug, Clone)]
pub enum Token {
    SpecChannel { channel_id: u32, depth: usize },
    SpecInterface { interface_id: u32, latency: i64 },
    ApCtrlChain { top_port_count: usize },
    TraceBb { function: String, block_index: usize },
    LoopBb { function: String, block_index: usize },
    Loop { name: String, tripcount: i64 },
    EndLoopBlocks,
    EndLoop,
    FifoRead { channel_id: u32 },
    FifoWrite { channel_id: u32 },
    AxiReadReq { interface_id: u32, address: u64, length: u64 },
    AxiWriteReq { interface_id: u32, address: u64, length: u64 },
    AxiRead { interface_id: u32, length: u64 },
    AxiWrite { interface_id: u32, length: u64 },
    AxiWriteResp { interface_id: u32 },
}

/// Parses tab-separated trace lines into [`Token`]s.
///
/// Field interning (streams/AXI interfaces by id) is the caller's job once
/// `spec_channel`/`spec_interface` tokens have been observed; this reader only
/// does lexical tokenization.
pub struct TokenReader<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> TokenReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { lines: text.lines() }
    }
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Result<Token, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_line(line));
        }
    }
}

fn parse_line(line: &str) -> Result<Token, CoreError> {
    let mut fields = line.split('\t');
    let kind = fields
        .next()
        .ok_or_else(|| CoreError::ProtocolViolation("empty trace line".into()))?;

    let next_u64 = |fields: &mut std::str::Split<'_, char>, what: &str| -> Result<u64, CoreError> {
        fields
            .next()
            .ok_or_else(|| CoreError::ProtocolViolation(format!("missing field {what} in {line:?}")))?
            .parse::<u64>()
            .map_err(|_| CoreError::ProtocolViolation(format!("bad integer field {what} in {line:?}")))
    };
    let next_i64 = |fields: &mut std::str::Split<'_, char>, what: &str| -> Result<i64, CoreError> {
        fields
            .next()
            .ok_or_else(|| CoreError::ProtocolViolation(format!("missing field {what} in {line:?}")))?
            .parse::<i64>()
            .map_err(|_| CoreError::ProtocolViolation(format!("bad integer field {what} in {line:?}")))
    };
    let next_str = |fields: &mut std::str::Split<'_, char>, what: &str| -> Result<String, CoreError> {
        Ok(fields
            .next()
            .ok_or_else(|| CoreError::ProtocolViolation(format!("missing field {what} in {line:?}")))?
            .to_string())
    };

    Ok(match kind {
        "spec_channel" => Token::SpecChannel {
            channel_id: next_u64(&mut fields, "channel_id")? as u32,
            depth: next_u64(&mut fields, "depth")? as usize,
        },
        "spec_interface" => Token::SpecInterface {
            interface_id: next_u64(&mut fields, "interface_id")? as u32,
            latency: next_i64(&mut fields, "latency")?,
        },
        "ap_ctrl_chain" => Token::ApCtrlChain {
            top_port_count: next_u64(&mut fields, "top_port_count")? as usize,
        },
        "trace_bb" => Token::TraceBb {
            function: next_str(&mut fields, "function")?,
            block_index: next_u64(&mut fields, "block_index")? as usize,
        },
        "loop_bb" => Token::LoopBb {
            function: next_str(&mut fields, "function")?,
            block_index: next_u64(&mut fields, "block_index")? as usize,
        },
        "loop" => Token::Loop {
            name: next_str(&mut fields, "name")?,
            tripcount: next_i64(&mut fields, "tripcount")?,
        },
        "end_loop_blocks" => Token::EndLoopBlocks,
        "end_loop" => Token::EndLoop,
        "fifo_read" => Token::FifoRead {
            channel_id: next_u64(&mut fields, "channel_id")? as u32,
        },
        "fifo_write" => Token::FifoWrite {
            channel_id: next_u64(&mut fields, "channel_id")? as u32,
        },
        "axi_readreq" => Token::AxiReadReq {
            interface_id: next_u64(&mut fields, "interface_id")? as u32,
            address: next_u64(&mut fields, "address")?,
            length: next_u64(&mut fields, "length")?,
        },
        "axi_writereq" => Token::AxiWriteReq {
            interface_id: next_u64(&mut fields, "interface_id")? as u32,
            address: next_u64(&mut fields, "address")?,
            length: next_u64(&mut fields, "length")?,
        },
        "axi_read" => Token::AxiRead {
            interface_id: next_u64(&mut fields, "interface_id")? as u32,
            length: next_u64(&mut fields, "length")?,
        },
        "axi_write" => Token::AxiWrite {
            interface_id: next_u64(&mut fields, "interface_id")? as u32,
            length: next_u64(&mut fields, "length")?,
        },
        "axi_writeresp" => Token::AxiWriteResp {
            interface_id: next_u64(&mut fields, "interface_id")? as u32,
        },
        other => {
            return Err(CoreError::ProtocolViolation(format!(
                "unknown trace token {other:?}"
            )))
        }
    })
}

/// Interning tables built from `spec_channel`/`spec_interface` tokens, handed
/// to the resolver alongside the token stream.
#[derive(Debug, Default)]
pub struct InterningTables {
    pub channel_depths: HashMap<u32, usize>,
    pub axi_latencies: HashMap<u32, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_trace() {
        let text = "spec_channel\t0\t4\ntrace_bb\tfoo\t1\nfifo_read\t0\n";
        let tokens: Result<Vec<_>, _> = TokenReader::new(text).collect();
        let tokens = tokens.unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(matches!(tokens[0], Token::SpecChannel { channel_id: 0, depth: 4 }));
        assert!(matches!(tokens[2], Token::FifoRead { channel_id: 0 }));
    }

    #[test]
    fn rejects_unknown_token() {
        let text = "frobnicate\t1\n";
        let mut reader = TokenReader::new(text);
        assert!(matches!(reader.next(), Some(Err(CoreError::ProtocolViolation(_)))));
    }

    #[test]
    fn axi_interface_lookup_picks_floor() {
        let interfaces = vec![
            AxiInterface { address: 0x1000, name: "a".into(), id: 0 },
            AxiInterface { address: 0x2000, name: "b".into(), id: 1 },
        ];
        let found = find_axi_interface(&interfaces, 0x1500).unwrap();
        assert_eq!(found.id, 0);
        let found = find_axi_interface(&interfaces, 0x2500).unwrap();
        assert_eq!(found.id, 1);
        assert!(find_axi_interface(&interfaces, 0x500).is_none());
    }
}
