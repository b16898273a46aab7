use crate::api::types::{ApiKey, CustomField, Role, User};

#[derive(Debug, Default)]
pub struct AdminStore {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub api_keys: Vec<ApiKey>,
    pub custom_fields: Vec<CustomField>,
}

impl AdminStore {
    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn set_roles(&mut self, roles: Vec<Role>) {
        self.roles = roles;
    }

    pub fn set_api_keys(&mut self, keys: Vec<ApiKey>) {
        self.api_keys = keys;
    }

    pub fn set_custom_fields(&mut self, fields: Vec<CustomField>) {
        self.custom_fields = fields;
    }

    pub fn role_name(&self, id: Option<i64>) -> &str {
        id.and_then(|id| self.roles.iter().find(|r| r.id == id))
            .map(|r| r.name.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_lookup() {
        let mut store = AdminStore::default();
        store.set_roles(
            serde_json::from_value(serde_json::json!([{"id": 2, "name": "Technician"}])).unwrap(),
        );
        assert_eq!(store.role_name(Some(2)), "Technician");
        assert_eq!(store.role_name(Some(9)), "");
        assert_eq!(store.role_name(None), "");
    }
}
