use crate::api::types::{Client, FailingChecks, Site};

pub const SORT_ALPHAFAIL: &str = "alphafail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeColor {
    /// Maintenance mode.
    Green,
    /// Failing error checks.
    Negative,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Client,
    Site,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub id: i64,
    /// `Client|3` or `Site|12`; selects what the agent table loads.
    pub raw: String,
    pub kind: NodeKind,
    pub color: Option<NodeColor>,
    pub client: Option<i64>,
    pub server_policy: Option<i64>,
    pub workstation_policy: Option<i64>,
    pub alert_template: Option<i64>,
    pub children: Vec<TreeNode>,
}

fn node_color(maintenance_mode: bool, failing: &FailingChecks) -> Option<NodeColor> {
    if maintenance_mode {
        Some(NodeColor::Green)
    } else if failing.error {
        Some(NodeColor::Negative)
    } else if failing.warning {
        Some(NodeColor::Warning)
    } else {
        None
    }
}

fn site_node(client: &Client, site: &Site) -> TreeNode {
    TreeNode {
        label: site.name.clone(),
        id: site.id,
        raw: format!("Site|{}", site.id),
        kind: NodeKind::Site,
        color: node_color(site.maintenance_mode, &site.failing_checks),
        client: Some(client.id),
        server_policy: site.server_policy,
        workstation_policy: site.workstation_policy,
        alert_template: site.alert_template,
        children: Vec::new(),
    }
}

/// Builds the client/site tree. With the `alphafail` sort, clients failing
/// error checks move to the top; the backend order is kept otherwise.
pub fn build_tree(clients: &[Client], sort: &str) -> Vec<TreeNode> {
    let mut nodes: Vec<TreeNode> = clients
        .iter()
        .map(|client| TreeNode {
            label: client.name.clone(),
            id: client.id,
            raw: format!("Client|{}", client.id),
            kind: NodeKind::Client,
            color: node_color(client.maintenance_mode, &client.failing_checks),
            client: None,
            server_policy: client.server_policy,
            workstation_policy: client.workstation_policy,
            alert_template: client.alert_template,
            children: client.sites.iter().map(|s| site_node(client, s)).collect(),
        })
        .collect();

    if sort == SORT_ALPHAFAIL {
        nodes.sort_by_key(|n| n.color != Some(NodeColor::Negative));
    }
    nodes
}

/// Flattens the tree into display rows: (depth, node).
pub fn flatten(tree: &[TreeNode]) -> Vec<(usize, &TreeNode)> {
    let mut rows = Vec::new();
    for client in tree {
        rows.push((0, client));
        rows.extend(client.children.iter().map(|site| (1, site)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clients() -> Vec<Client> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Alpha", "failing_checks": {"error": false, "warning": true}, "sites": [
                {"id": 10, "name": "Main", "maintenance_mode": true, "failing_checks": {"error": true, "warning": false}}
            ]},
            {"id": 2, "name": "Bravo", "failing_checks": {"error": true, "warning": true}, "sites": []},
            {"id": 3, "name": "Charlie", "maintenance_mode": true, "failing_checks": {"error": true, "warning": false}, "sites": []},
            {"id": 4, "name": "Delta", "failing_checks": {"error": true, "warning": false}, "sites": []}
        ]))
        .unwrap()
    }

    #[test]
    fn test_node_colors_and_raw_keys() {
        let tree = build_tree(&clients(), "alpha");
        assert_eq!(tree[0].raw, "Client|1");
        assert_eq!(tree[0].color, Some(NodeColor::Warning));
        assert_eq!(tree[0].children[0].raw, "Site|10");
        assert_eq!(tree[0].children[0].color, Some(NodeColor::Green));
        assert_eq!(tree[0].children[0].client, Some(1));
        assert_eq!(tree[2].color, Some(NodeColor::Green));
    }

    #[test]
    fn test_alphafail_moves_failing_clients_first() {
        let tree = build_tree(&clients(), SORT_ALPHAFAIL);
        let labels: Vec<_> = tree.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["Bravo", "Delta", "Alpha", "Charlie"]);
    }

    #[test]
    fn test_flatten() {
        let tree = build_tree(&clients(), "alpha");
        let rows = flatten(&tree);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1].0, 1);
        assert_eq!(rows[1].1.label, "Main");
    }
}
