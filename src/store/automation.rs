use crate::api::types::{AutomatedTask, Check, Policy};

#[derive(Debug, Default)]
pub struct AutomationStore {
    pub selected_policy: Option<i64>,
    pub checks: Vec<Check>,
    pub tasks: Vec<AutomatedTask>,
    pub policies: Vec<Policy>,
}

impl AutomationStore {
    pub fn set_policies(&mut self, policies: Vec<Policy>) {
        if let Some(id) = self.selected_policy {
            if !policies.iter().any(|p| p.id == id) {
                self.set_selected_policy(None);
            }
        }
        self.policies = policies;
    }

    /// Changing the selection drops the previous policy's checks and tasks.
    pub fn set_selected_policy(&mut self, id: Option<i64>) {
        if self.selected_policy != id {
            self.checks.clear();
            self.tasks.clear();
        }
        self.selected_policy = id;
    }

    pub fn set_policy_checks(&mut self, checks: Vec<Check>) {
        self.checks = checks;
    }

    pub fn set_policy_tasks(&mut self, tasks: Vec<AutomatedTask>) {
        self.tasks = tasks;
    }

    pub fn selected(&self) -> Option<&Policy> {
        let id = self.selected_policy?;
        self.policies.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::CheckType;

    fn policy(id: i64) -> Policy {
        serde_json::from_value(serde_json::json!({"id": id, "name": format!("Policy {id}")})).unwrap()
    }

    #[test]
    fn test_selection_resets_children() {
        let mut store = AutomationStore::default();
        store.set_policies(vec![policy(1), policy(2)]);
        store.set_selected_policy(Some(1));
        store.set_policy_checks(vec![Check::new(CheckType::Ping)]);
        assert_eq!(store.selected().unwrap().name, "Policy 1");

        store.set_selected_policy(Some(1));
        assert_eq!(store.checks.len(), 1);

        store.set_selected_policy(Some(2));
        assert!(store.checks.is_empty());
    }

    #[test]
    fn test_removed_policy_clears_selection() {
        let mut store = AutomationStore::default();
        store.set_policies(vec![policy(1)]);
        store.set_selected_policy(Some(1));
        store.set_policies(vec![policy(2)]);
        assert_eq!(store.selected_policy, None);
    }
}
