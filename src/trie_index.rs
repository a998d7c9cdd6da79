//! Bit-trie index
//!
//! One binary trie per address family, each stored as an arena of nodes.
//! An edge consumes one address bit, MSB-first; a record with prefix length
//! `L` lives on the node at depth `L` reached by walking its canonical base
//! address.
//!
//! Lookup walks the query address from the root and collects the records of
//! *every* node on the path, stopping at the first missing child. A /8 and a
//! nested /16 covering the same address are therefore both returned, shallow
//! first. This is containment, not longest-prefix routing.
//!
//! ```text
//!   root ─0─ n1 ─0─ n2 ─ ... ─ n8 [10.0.0.0/8] ─ ... ─ n16 [10.0.0.0/16]
//!      query 10.0.0.5 collects n8 and n16
//! ```
//!
//! The IPv4 and IPv6 tries never share nodes: a 24-bit walk means different
//! things in each family, so the query's family selects the trie.

use crate::address::{Address, AddressFamily};
use crate::prefix_index::{IndexKind, PrefixIndex};
use crate::record::PrefixRecord;

/// Containment index over per-family bit-tries
#[derive(Debug)]
pub struct TrieIndex {
    /// All accepted records; nodes refer to them by position
    records: Vec<PrefixRecord>,
    v4: FamilyTrie,
    v6: FamilyTrie,
}

/// Arena-allocated trie for one address family; node 0 is the root
#[derive(Debug)]
struct FamilyTrie {
    nodes: Vec<Node>,
}

/// A node in the trie
#[derive(Debug, Clone, Default)]
struct Node {
    /// Child for bit 0
    left: Option<u32>,
    /// Child for bit 1
    right: Option<u32>,
    /// Records whose prefix ends exactly at this depth
    records: Vec<u32>,
}

impl Node {
    fn child(&self, bit: u8) -> Option<u32> {
        if bit == 0 {
            self.left
        } else {
            self.right
        }
    }

    fn set_child(&mut self, bit: u8, id: u32) {
        if bit == 0 {
            self.left = Some(id);
        } else {
            self.right = Some(id);
        }
    }
}

impl FamilyTrie {
    fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Walk `prefix_len` bits of `base`, creating nodes as needed, and
    /// attach `record_id` to the terminal node
    fn insert(&mut self, base: &Address, prefix_len: u8, record_id: u32) {
        let mut node_id = 0u32; // Start at root

        for depth in 0..prefix_len {
            let bit = base.bit(depth);
            node_id = match self.nodes[node_id as usize].child(bit) {
                Some(child_id) => child_id,
                None => {
                    let new_id = self.allocate_node();
                    self.nodes[node_id as usize].set_child(bit, new_id);
                    new_id
                }
            };
        }

        self.nodes[node_id as usize].records.push(record_id);
    }

    /// Visit the record list of every node on the path of `addr`
    fn walk<'a>(&'a self, addr: &Address, mut visit: impl FnMut(&'a [u32])) {
        let mut node = &self.nodes[0];

        for depth in 0..addr.family().width() {
            visit(&node.records);
            match node.child(addr.bit(depth)) {
                Some(child_id) => node = &self.nodes[child_id as usize],
                None => return,
            }
        }

        // Reached full width: host routes (/32, /128) live here
        visit(&node.records);
    }

    fn allocate_node(&mut self) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(Node::default());
        id
    }
}

impl TrieIndex {
    /// Create an empty index with one root per family
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            v4: FamilyTrie::new(),
            v6: FamilyTrie::new(),
        }
    }

    /// Number of allocated nodes in a family's trie, root included
    pub fn node_count(&self, family: AddressFamily) -> usize {
        self.trie(family).nodes.len()
    }

    fn trie(&self, family: AddressFamily) -> &FamilyTrie {
        match family {
            AddressFamily::V4 => &self.v4,
            AddressFamily::V6 => &self.v6,
        }
    }
}

impl Default for TrieIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex for TrieIndex {
    fn add(&mut self, record: PrefixRecord) {
        let record_id = self.records.len() as u32;
        let network = *record.network();

        let trie = match network.family() {
            AddressFamily::V4 => &mut self.v4,
            AddressFamily::V6 => &mut self.v6,
        };
        trie.insert(&network.address(), network.prefix_len(), record_id);
        self.records.push(record);
    }

    fn lookup(&self, address: &Address) -> Vec<&PrefixRecord> {
        let mut matches = Vec::new();
        self.trie(address.family()).walk(address, |ids| {
            matches.extend(ids.iter().map(|&id| &self.records[id as usize]));
        });
        matches
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn kind(&self) -> IndexKind {
        IndexKind::Trie
    }
}
