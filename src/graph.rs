/*!
Export of automata as plain node and edge lists.

A [`Graph`] is meant to be handed to something that draws it, such as a
front end that lays out nodes itself or Graphviz via [`Graph::to_dot`]. Each
node carries a suggested position: its breadth first distance from the start
state, and its index among the nodes at that distance.
*/

use core::fmt::Write;
use std::collections::VecDeque;

use crate::{dfa::DFA, nfa::NFA};

/// A node of an exported automaton.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    /// A stable identifier. For an NFA this is the state ID. For a DFA it is
    /// the comma separated list of NFA states it represents.
    pub id: String,
    /// Text to draw on the node. For an NFA this is the state ID, for a DFA
    /// its set of NFA states, e.g., `{0,2,5}`.
    pub label: String,
    /// Whether the state is accepting.
    pub accepting: bool,
    /// Breadth first distance from the start state.
    pub level: usize,
    /// Index of this node among the nodes sharing its level.
    pub row: usize,
}

/// A transition of an exported automaton.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// The character consumed, or `None` for an epsilon transition.
    pub label: Option<char>,
}

/// An automaton as a list of nodes and a list of edges.
///
/// The start state is always the first node.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Exports every state reachable from the start of `nfa`, including
    /// epsilon transitions.
    pub fn from_nfa(nfa: &NFA) -> Graph {
        layered(nfa.len(), nfa.start(), |id| {
            let state = nfa.state(id);
            let labelled = state
                .transitions()
                .iter()
                .flat_map(|(&ch, targets)| targets.iter().map(move |&t| (Some(ch), t)));
            let epsilons = state.epsilons().iter().map(|&t| (None, t));
            let out: Vec<(Option<char>, usize)> = labelled.chain(epsilons).collect();
            (id.to_string(), id.to_string(), state.is_accepting(), out)
        })
    }

    /// Exports every state of `dfa`.
    pub fn from_dfa(dfa: &DFA) -> Graph {
        layered(dfa.len(), dfa.start(), |id| {
            let state = dfa.state(id);
            let out = state.transitions().iter().map(|(&ch, &t)| (Some(ch), t)).collect();
            let key = state.key_string();
            let label = format!("{{{}}}", key);
            (key, label, state.is_accepting(), out)
        })
    }

    /// Renders this graph in the Graphviz DOT language.
    ///
    /// Accepting states are drawn with a double circle and epsilon
    /// transitions are labelled `ε`.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(dot, "digraph automaton {{");
        let _ = writeln!(dot, "  rankdir=LR;");
        let _ = writeln!(dot, "  __start [shape=point];");
        for node in &self.nodes {
            let shape = if node.accepting { "doublecircle" } else { "circle" };
            let _ = writeln!(
                dot,
                "  \"{}\" [shape={}, label=\"{}\"];",
                node.id,
                shape,
                escape_str(&node.label),
            );
        }
        if let Some(start) = self.nodes.first() {
            let _ = writeln!(dot, "  __start -> \"{}\";", start.id);
        }
        for edge in &self.edges {
            let label = match edge.label {
                Some(ch) => escape(ch),
                None => "ε".to_string(),
            };
            let _ = writeln!(
                dot,
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                edge.source, edge.target, label,
            );
        }
        dot.push_str("}\n");
        dot
    }
}

/// Breadth first walk from `start` over `len` states. `visit` returns the
/// node ID, its label, whether the state accepts, and its outgoing
/// transitions.
fn layered<F>(len: usize, start: usize, mut visit: F) -> Graph
where
    F: FnMut(usize) -> (String, String, bool, Vec<(Option<char>, usize)>),
{
    let mut graph = Graph::default();
    let mut seen = vec![false; len];
    let mut ids: Vec<Option<String>> = vec![None; len];
    let mut rows: Vec<usize> = vec![];
    let mut queue = VecDeque::new();
    let mut pending: Vec<(usize, Option<char>, usize)> = vec![];

    seen[start] = true;
    queue.push_back((start, 0));
    while let Some((id, level)) = queue.pop_front() {
        if rows.len() <= level {
            rows.resize(level + 1, 0);
        }
        let (node_id, label, accepting, out) = visit(id);
        graph.nodes.push(Node { id: node_id.clone(), label, accepting, level, row: rows[level] });
        rows[level] += 1;
        ids[id] = Some(node_id);
        for (label, target) in out {
            pending.push((id, label, target));
            if !seen[target] {
                seen[target] = true;
                queue.push_back((target, level + 1));
            }
        }
    }
    // Every target was enqueued and therefore visited, so all IDs are known.
    for (source, label, target) in pending {
        if let (Some(source), Some(target)) = (&ids[source], &ids[target]) {
            graph.edges.push(Edge { source: source.clone(), target: target.clone(), label });
        }
    }
    graph
}

fn escape(ch: char) -> String {
    match ch {
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        ch => ch.to_string(),
    }
}

fn escape_str(s: &str) -> String {
    s.chars().map(escape).collect()
}
