pub mod checks;
pub mod dropdowns;
pub mod logs;
pub mod services;

use crate::api::types::{Agent, Check, Client, CustomField, Script, User};

const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Id(i64),
    Key(String),
}

/// One entry of a dropdown list. Categories are non-selectable headers.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOption {
    Category(String),
    Item {
        label: String,
        value: OptionValue,
        /// Scripts only: default timeout and arguments.
        timeout: Option<i64>,
        args: Vec<String>,
    },
    Plain(String),
}

impl SelectOption {
    pub fn item(label: impl Into<String>, value: OptionValue) -> Self {
        SelectOption::Item {
            label: label.into(),
            value,
            timeout: None,
            args: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SelectOption::Category(label) | SelectOption::Plain(label) => label,
            SelectOption::Item { label, .. } => label,
        }
    }

    pub fn value(&self) -> Option<&OptionValue> {
        match self {
            SelectOption::Item { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, SelectOption::Category(_))
    }
}

/// Flat option lists are plain labels, optionally without repeats.
fn flat<'a>(labels: impl Iterator<Item = &'a str>, dedupe: bool) -> Vec<SelectOption> {
    let mut out: Vec<SelectOption> = Vec::new();
    for label in labels {
        if dedupe && out.iter().any(|o| o.label() == label) {
            continue;
        }
        out.push(SelectOption::Plain(label.to_string()));
    }
    out
}

fn sort_items(items: &mut [SelectOption]) {
    items.sort_by_key(|o| o.label().to_lowercase());
}

/// Emits one category header per entry of `categories`, followed by its items
/// sorted by label.
fn grouped<T>(
    categories: &[String],
    data: &[T],
    category_of: impl Fn(&T) -> String,
    to_item: impl Fn(&T) -> SelectOption,
) -> Vec<SelectOption> {
    let mut options = Vec::new();
    for cat in categories {
        options.push(SelectOption::Category(cat.clone()));
        let mut items: Vec<SelectOption> = data
            .iter()
            .filter(|d| &category_of(*d) == cat)
            .map(&to_item)
            .collect();
        sort_items(&mut items);
        options.extend(items);
    }
    options
}

fn sorted_unique(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values.dedup();
    values
}

pub fn format_script_options(scripts: &[Script], flat_list: bool) -> Vec<SelectOption> {
    if flat_list {
        return flat(scripts.iter().map(|s| s.name.as_str()), false);
    }
    let category_of = |s: &Script| {
        s.category
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNASSIGNED.to_string())
    };
    let categories = sorted_unique(scripts.iter().map(category_of).collect());
    grouped(&categories, scripts, category_of, |s: &Script| SelectOption::Item {
        label: s.name.clone(),
        value: OptionValue::Id(s.id),
        timeout: Some(s.default_timeout),
        args: s.args.clone(),
    })
}

/// Agents grouped under "client > site". Values are agent ids.
pub fn format_agent_options(agents: &[Agent], flat_list: bool) -> Vec<SelectOption> {
    if flat_list {
        return flat(agents.iter().map(|a| a.hostname.as_str()), false);
    }
    let category_of = |a: &Agent| format!("{} > {}", a.client, a.site);
    let categories = sorted_unique(agents.iter().map(category_of).collect());
    grouped(&categories, agents, category_of, |a: &Agent| {
        SelectOption::item(a.hostname.clone(), OptionValue::Key(a.agent_id.clone()))
    })
}

pub fn format_custom_field_options(fields: &[CustomField], flat_list: bool) -> Vec<SelectOption> {
    if flat_list {
        return flat(fields.iter().map(|f| f.name.as_str()), true);
    }
    let categories: Vec<String> = ["Client", "Site", "Agent"].iter().map(|c| c.to_string()).collect();
    grouped(
        &categories,
        fields,
        |f: &CustomField| crate::common::format::capitalize(&f.model),
        |f: &CustomField| SelectOption::item(f.name.clone(), OptionValue::Id(f.id)),
    )
}

pub fn format_client_options(clients: &[Client], flat_list: bool) -> Vec<SelectOption> {
    if flat_list {
        return flat(clients.iter().map(|c| c.name.as_str()), true);
    }
    clients
        .iter()
        .map(|c| SelectOption::item(c.name.clone(), OptionValue::Id(c.id)))
        .collect()
}

/// One category per client with its sites beneath, in backend order.
pub fn format_site_options(clients: &[Client], flat_list: bool) -> Vec<SelectOption> {
    let mut options = Vec::new();
    for client in clients {
        options.push(SelectOption::Category(client.name.clone()));
        if flat_list {
            options.extend(flat(client.sites.iter().map(|s| s.name.as_str()), true));
        } else {
            options.extend(
                client
                    .sites
                    .iter()
                    .map(|s| SelectOption::item(s.name.clone(), OptionValue::Id(s.id))),
            );
        }
    }
    options
}

pub fn format_user_options(users: &[User], flat_list: bool) -> Vec<SelectOption> {
    if flat_list {
        return flat(users.iter().map(|u| u.username.as_str()), true);
    }
    users
        .iter()
        .map(|u| SelectOption::item(u.username.clone(), OptionValue::Id(u.id)))
        .collect()
}

/// Checks that were never saved have no id and are skipped.
pub fn format_check_options(checks: &[Check], flat_list: bool) -> Vec<SelectOption> {
    if flat_list {
        let descriptions: Vec<String> = checks.iter().map(Check::description).collect();
        return flat(descriptions.iter().map(String::as_str), true);
    }
    checks
        .iter()
        .filter_map(|c| Some(SelectOption::item(c.description(), OptionValue::Id(c.id?))))
        .collect()
}

/// Type-ahead filter. An empty needle returns everything; otherwise category
/// headers are dropped and labels are matched case-insensitively.
pub fn filter_options(options: &[SelectOption], needle: &str) -> Vec<SelectOption> {
    if needle.is_empty() {
        return options.to_vec();
    }
    let needle = needle.to_lowercase();
    options
        .iter()
        .filter(|o| !o.is_category() && o.label().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scripts() -> Vec<Script> {
        serde_json::from_value(json!([
            {"id": 1, "name": "zip logs", "category": "Maintenance", "default_timeout": 60, "args": ["-Days 7"]},
            {"id": 2, "name": "Clear Temp", "category": "Maintenance"},
            {"id": 3, "name": "Restart Spooler", "category": null},
            {"id": 4, "name": "Install 7zip", "category": "Apps"},
            {"id": 5, "name": "Clear Temp", "category": "Apps"}
        ]))
        .unwrap()
    }

    fn labels(options: &[SelectOption]) -> Vec<String> {
        options
            .iter()
            .map(|o| match o {
                SelectOption::Category(c) => format!("[{}]", c),
                other => other.label().to_string(),
            })
            .collect()
    }

    #[test]
    fn test_script_options_grouped() {
        let options = format_script_options(&scripts(), false);
        assert_eq!(
            labels(&options),
            [
                "[Apps]",
                "Clear Temp",
                "Install 7zip",
                "[Maintenance]",
                "Clear Temp",
                "zip logs",
                "[Unassigned]",
                "Restart Spooler"
            ]
        );
        match &options[5] {
            SelectOption::Item { timeout, args, value, .. } => {
                assert_eq!(*timeout, Some(60));
                assert_eq!(args, &vec!["-Days 7".to_string()]);
                assert_eq!(value, &OptionValue::Id(1));
            }
            other => panic!("unexpected option {:?}", other),
        }
    }

    #[test]
    fn test_flat_scripts_keep_duplicates() {
        let options = format_script_options(&scripts(), true);
        assert_eq!(options.len(), 5);
        assert!(options.iter().all(|o| matches!(o, SelectOption::Plain(_))));
    }

    #[test]
    fn test_agent_options() {
        let agents: Vec<Agent> = serde_json::from_value(json!([
            {"agent_id": "b", "hostname": "SRV-02", "client": "Contoso", "site": "HQ"},
            {"agent_id": "a", "hostname": "desktop-01", "client": "Contoso", "site": "HQ"},
            {"agent_id": "c", "hostname": "LAPTOP", "client": "Acme", "site": "Remote"}
        ]))
        .unwrap();
        let options = format_agent_options(&agents, false);
        assert_eq!(
            labels(&options),
            ["[Acme > Remote]", "LAPTOP", "[Contoso > HQ]", "desktop-01", "SRV-02"]
        );
        assert_eq!(options[3].value(), Some(&OptionValue::Key("a".to_string())));
    }

    #[test]
    fn test_custom_field_options_by_model() {
        let fields: Vec<CustomField> = serde_json::from_value(json!([
            {"id": 1, "name": "Contract", "model": "client"},
            {"id": 2, "name": "Asset Tag", "model": "agent"},
            {"id": 3, "name": "Asset Tag", "model": "site"}
        ]))
        .unwrap();
        assert_eq!(
            labels(&format_custom_field_options(&fields, false)),
            ["[Client]", "Contract", "[Site]", "Asset Tag", "[Agent]", "Asset Tag"]
        );
        assert_eq!(labels(&format_custom_field_options(&fields, true)), ["Contract", "Asset Tag"]);
    }

    #[test]
    fn test_site_options() {
        let clients: Vec<Client> = serde_json::from_value(json!([
            {"id": 1, "name": "Contoso", "sites": [{"id": 4, "name": "HQ"}, {"id": 5, "name": "Branch"}]},
            {"id": 2, "name": "Acme", "sites": [{"id": 6, "name": "HQ"}]}
        ]))
        .unwrap();
        let options = format_site_options(&clients, false);
        assert_eq!(labels(&options), ["[Contoso]", "HQ", "Branch", "[Acme]", "HQ"]);
        assert_eq!(options[2].value(), Some(&OptionValue::Id(5)));
    }

    #[test]
    fn test_check_options() {
        let checks: Vec<Check> = serde_json::from_value(json!([
            {"id": 9, "check_type": "ping", "readable_desc": "Ping: gateway"},
            {"check_type": "ping", "readable_desc": "Ping: unsaved"}
        ]))
        .unwrap();
        let options = format_check_options(&checks, false);
        assert_eq!(options, vec![SelectOption::item("Ping: gateway", OptionValue::Id(9))]);
    }

    #[test]
    fn test_filter_options() {
        let options = format_script_options(&scripts(), false);
        assert_eq!(filter_options(&options, "").len(), options.len());

        let filtered = filter_options(&options, "CLEAR");
        assert_eq!(labels(&filtered), ["Clear Temp", "Clear Temp"]);

        let flat_options = format_script_options(&scripts(), true);
        assert_eq!(labels(&filter_options(&flat_options, "zip")), ["zip logs", "Install 7zip"]);
        assert!(filter_options(&options, "apps").is_empty());
    }
}
