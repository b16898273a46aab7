use super::{
    OptionValue, SelectOption, filter_options, format_agent_options, format_check_options,
    format_client_options, format_custom_field_options, format_script_options, format_site_options,
    format_user_options,
};
use crate::api::TrmmClient;
use crate::api::accounts::{AccountsApi, UserQuery};
use crate::api::agents::{AgentQuery, AgentsApi};
use crate::api::automation::AutomationApi;
use crate::api::clients::ClientsApi;
use crate::api::dashboard::{CoreApi, CustomFieldQuery};
use crate::api::scripts::{ScriptQuery, ScriptsApi};
use crate::error::{ApiError, ApiResult};

/// Selection state shared by every dropdown: the options, a type-ahead
/// needle and the highlighted entry within the filtered list.
#[derive(Debug, Default, Clone)]
pub struct Dropdown {
    pub options: Vec<SelectOption>,
    pub needle: String,
    pub highlighted: Option<usize>,
    pub loading: bool,
}

impl Dropdown {
    /// Applies a fetch result. Failures are logged and leave the list empty.
    pub fn apply(&mut self, name: &str, result: Result<Vec<SelectOption>, String>) {
        self.loading = false;
        match result {
            Ok(options) => self.options = options,
            Err(e) => {
                tracing::warn!(dropdown = name, error = %e, "failed to load options");
                self.options.clear();
            }
        }
        self.highlighted = self.first_selectable();
    }

    pub fn filtered(&self) -> Vec<SelectOption> {
        filter_options(&self.options, &self.needle)
    }

    pub fn set_needle(&mut self, needle: &str) {
        self.needle = needle.to_string();
        self.highlighted = self.first_selectable();
    }

    fn first_selectable(&self) -> Option<usize> {
        self.filtered().iter().position(|o| !o.is_category())
    }

    /// Moves the highlight by `delta`, skipping category headers.
    pub fn step(&mut self, delta: isize) {
        let filtered = self.filtered();
        let Some(mut i) = self.highlighted else {
            self.highlighted = self.first_selectable();
            return;
        };
        loop {
            let next = i as isize + delta;
            if next < 0 || next >= filtered.len() as isize {
                return;
            }
            i = next as usize;
            if !filtered[i].is_category() {
                self.highlighted = Some(i);
                return;
            }
        }
    }

    pub fn selected(&self) -> Option<SelectOption> {
        self.highlighted.and_then(|i| self.filtered().get(i).cloned())
    }
}

/// Script picker. Choosing a script carries its timeout and arguments over.
#[derive(Debug, Clone)]
pub struct ScriptDropdown {
    pub dropdown: Dropdown,
    pub script_id: Option<i64>,
    pub default_timeout: i64,
    pub default_args: Vec<String>,
}

impl Default for ScriptDropdown {
    fn default() -> Self {
        Self {
            dropdown: Dropdown::default(),
            script_id: None,
            default_timeout: 30,
            default_args: Vec::new(),
        }
    }
}

impl ScriptDropdown {
    pub fn select_script(&mut self, id: i64) {
        self.script_id = Some(id);
        let found = self.dropdown.options.iter().find_map(|o| match o {
            SelectOption::Item {
                value: OptionValue::Id(v),
                timeout,
                args,
                ..
            } if *v == id => Some((*timeout, args.clone())),
            _ => None,
        });
        if let Some((timeout, args)) = found {
            if let Some(timeout) = timeout {
                self.default_timeout = timeout;
            }
            self.default_args = args;
        }
    }
}

pub async fn fetch_user_options(client: &TrmmClient, flat: bool) -> ApiResult<Vec<SelectOption>> {
    let users = client.fetch_users(&UserQuery::default()).await?;
    Ok(format_user_options(&users, flat))
}

/// Server-side username search. Needles shorter than two characters are
/// not searched and yield `None`.
pub async fn search_user_options(
    client: &TrmmClient,
    needle: &str,
) -> Option<ApiResult<Vec<SelectOption>>> {
    if needle.chars().count() < 2 {
        return None;
    }
    let query = UserQuery {
        search: Some(needle.to_lowercase()),
    };
    Some(client.fetch_users(&query).await.map(|users| {
        users
            .into_iter()
            .map(|u| SelectOption::Plain(u.username))
            .collect()
    }))
}

pub async fn fetch_agent_options(client: &TrmmClient, flat: bool) -> ApiResult<Vec<SelectOption>> {
    let query = AgentQuery {
        detail: Some(false),
        ..Default::default()
    };
    let agents = client.fetch_agents(&query).await?;
    Ok(format_agent_options(&agents, flat))
}

pub async fn fetch_client_options(client: &TrmmClient, flat: bool) -> ApiResult<Vec<SelectOption>> {
    let clients = client.fetch_clients().await?;
    Ok(format_client_options(&clients, flat))
}

pub async fn fetch_site_options(client: &TrmmClient) -> ApiResult<Vec<SelectOption>> {
    let clients = client.fetch_clients().await?;
    Ok(format_site_options(&clients, false))
}

/// `model` is "client", "site" or "agent"; `None` lists every field.
pub async fn fetch_custom_field_options(
    client: &TrmmClient,
    model: Option<&str>,
    flat: bool,
) -> ApiResult<Vec<SelectOption>> {
    let query = CustomFieldQuery {
        model: model.map(str::to_string),
    };
    let fields = client.fetch_custom_fields(&query).await?;
    Ok(format_custom_field_options(&fields, flat))
}

pub async fn fetch_script_options(
    client: &TrmmClient,
    show_community_scripts: bool,
    flat: bool,
) -> ApiResult<Vec<SelectOption>> {
    let scripts = client
        .fetch_scripts(&ScriptQuery {
            show_community_scripts,
        })
        .await?;
    Ok(format_script_options(&scripts, flat))
}

/// Checks come either from an agent or from a policy; one of the two is required.
pub async fn fetch_check_options(
    client: &TrmmClient,
    agent: Option<&str>,
    policy: Option<i64>,
    flat: bool,
) -> ApiResult<Vec<SelectOption>> {
    let checks = match (agent, policy) {
        (Some(agent_id), _) => client.fetch_agent_checks(agent_id).await?,
        (None, Some(policy_id)) => client.fetch_policy_checks(policy_id).await?,
        (None, None) => {
            tracing::error!("check options need an agent or a policy");
            return Err(ApiError::BadRequest(
                "An agent or a policy is required to list checks".to_string(),
            ));
        }
    };
    Ok(format_check_options(&checks, flat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, serve_once};

    fn script_options() -> Vec<SelectOption> {
        vec![
            SelectOption::Category("Maintenance".to_string()),
            SelectOption::Item {
                label: "Clear Temp".to_string(),
                value: OptionValue::Id(2),
                timeout: Some(120),
                args: vec!["-Force".to_string()],
            },
            SelectOption::Item {
                label: "Defrag".to_string(),
                value: OptionValue::Id(3),
                timeout: Some(900),
                args: vec![],
            },
        ]
    }

    #[test]
    fn test_apply_failure_clears_options() {
        let mut dropdown = Dropdown::default();
        dropdown.apply("scripts", Ok(script_options()));
        assert_eq!(dropdown.options.len(), 3);
        assert_eq!(dropdown.highlighted, Some(1));

        dropdown.apply("scripts", Err("connection refused".to_string()));
        assert!(dropdown.options.is_empty());
        assert_eq!(dropdown.highlighted, None);
    }

    #[test]
    fn test_step_skips_categories() {
        let mut dropdown = Dropdown::default();
        dropdown.apply("scripts", Ok(script_options()));
        dropdown.step(1);
        assert_eq!(dropdown.selected().unwrap().label(), "Defrag");
        dropdown.step(1);
        assert_eq!(dropdown.selected().unwrap().label(), "Defrag");
        dropdown.step(-1);
        assert_eq!(dropdown.selected().unwrap().label(), "Clear Temp");
        dropdown.step(-1);
        assert_eq!(dropdown.selected().unwrap().label(), "Clear Temp");
    }

    #[test]
    fn test_needle_filters() {
        let mut dropdown = Dropdown::default();
        dropdown.apply("scripts", Ok(script_options()));
        dropdown.set_needle("def");
        assert_eq!(dropdown.filtered().len(), 1);
        assert_eq!(dropdown.selected().unwrap().label(), "Defrag");
    }

    #[test]
    fn test_select_script_sets_defaults() {
        let mut scripts = ScriptDropdown::default();
        assert_eq!(scripts.default_timeout, 30);
        scripts.dropdown.apply("scripts", Ok(script_options()));

        scripts.select_script(2);
        assert_eq!(scripts.default_timeout, 120);
        assert_eq!(scripts.default_args, vec!["-Force".to_string()]);

        scripts.select_script(3);
        assert_eq!(scripts.default_timeout, 900);
        assert!(scripts.default_args.is_empty());
    }

    #[tokio::test]
    async fn test_short_user_search_is_skipped() {
        let client = client_for("http://127.0.0.1:9", Some("abc"), None);
        assert!(search_user_options(&client, "j").await.is_none());
    }

    #[tokio::test]
    async fn test_user_search_lowercases() {
        let (url, handle) = serve_once(200, r#"[{"id": 1, "username": "jsmith"}]"#).await;
        let client = client_for(&url, Some("abc"), None);

        let options = search_user_options(&client, "JS").await.unwrap().unwrap();
        assert_eq!(options, vec![SelectOption::Plain("jsmith".to_string())]);

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /accounts/users/?search=js HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_site_options_grouped_by_client() {
        let body = r#"[{"id": 1, "name": "Contoso", "sites": [{"id": 4, "name": "HQ"}, {"id": 5, "name": "Lab"}]}]"#;
        let (url, handle) = serve_once(200, body).await;
        let client = client_for(&url, Some("abc"), None);

        let options = fetch_site_options(&client).await.unwrap();
        assert_eq!(options[0], SelectOption::Category("Contoso".to_string()));
        assert_eq!(options[2].value(), Some(&OptionValue::Id(5)));

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /clients/ HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_client_options() {
        let (url, handle) = serve_once(200, r#"[{"id": 3, "name": "Fabrikam", "sites": []}]"#).await;
        let client = client_for(&url, Some("abc"), None);

        let options = fetch_client_options(&client, false).await.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label(), "Fabrikam");
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_user_options_use_ids() {
        let (url, handle) = serve_once(200, r#"[{"id": 7, "username": "tech"}]"#).await;
        let client = client_for(&url, Some("abc"), None);

        let options = fetch_user_options(&client, false).await.unwrap();
        assert_eq!(options[0].value(), Some(&OptionValue::Id(7)));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_custom_field_options_scoped_by_model() {
        let body = r#"[{"id": 2, "name": "Asset Tag", "model": "agent", "type": "text"}]"#;
        let (url, handle) = serve_once(200, body).await;
        let client = client_for(&url, Some("abc"), None);

        let options = fetch_custom_field_options(&client, Some("agent"), false).await.unwrap();
        assert!(options.contains(&SelectOption::Category("Agent".to_string())));

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /core/customfields/?model=agent HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_check_options_need_a_source() {
        let client = client_for("http://127.0.0.1:9", Some("abc"), None);
        let err = fetch_check_options(&client, None, None, false).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
