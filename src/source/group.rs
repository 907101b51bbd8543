//! Territory / connection group classification

use crate::source::{RawGroup, RawNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Holds a label: outline, label, center marker, optional fortification
    Territory,
    /// No label: lines and polylines between territories
    Connection,
}

/// Groups split by kind, each list in document order
#[derive(Debug, Default)]
pub struct GroupSplit<'a> {
    pub territories: Vec<&'a RawGroup>,
    pub connections: Vec<&'a RawGroup>,
}

impl RawGroup {
    /// `None` for groups without element children
    pub fn kind(&self) -> Option<GroupKind> {
        if self.children.iter().any(|c| matches!(c, RawNode::Label(_))) {
            Some(GroupKind::Territory)
        } else if !self.children.is_empty() {
            Some(GroupKind::Connection)
        } else {
            None
        }
    }
}

pub fn classify_groups(groups: &[RawGroup]) -> GroupSplit<'_> {
    let mut split = GroupSplit::default();
    for group in groups {
        match group.kind() {
            Some(GroupKind::Territory) => split.territories.push(group),
            Some(GroupKind::Connection) => split.connections.push(group),
            None => {}
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawLine;

    fn group(index: usize, children: Vec<RawNode>) -> RawGroup {
        RawGroup { index, children }
    }

    fn line() -> RawNode {
        RawNode::Line(RawLine {
            endpoints: None,
            class: None,
        })
    }

    #[test]
    fn test_label_makes_territory() {
        let g = group(0, vec![RawNode::Other, RawNode::Label("3".into())]);
        assert_eq!(g.kind(), Some(GroupKind::Territory));
    }

    #[test]
    fn test_unlabelled_group_is_connection() {
        assert_eq!(group(0, vec![line(), line()]).kind(), Some(GroupKind::Connection));
    }

    #[test]
    fn test_empty_group_ignored() {
        assert_eq!(group(0, vec![]).kind(), None);
    }

    #[test]
    fn test_split_preserves_order() {
        let groups = vec![
            group(0, vec![line()]),
            group(1, vec![RawNode::Label("0".into())]),
            group(2, vec![]),
            group(3, vec![RawNode::Label("1".into())]),
            group(4, vec![line()]),
        ];
        let split = classify_groups(&groups);
        let territory_indices: Vec<usize> = split.territories.iter().map(|g| g.index).collect();
        let connection_indices: Vec<usize> = split.connections.iter().map(|g| g.index).collect();
        assert_eq!(territory_indices, vec![1, 3]);
        assert_eq!(connection_indices, vec![0, 4]);
    }
}
