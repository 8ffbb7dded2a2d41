use serde::{Deserialize, Serialize};

/// Customer record as the service returns it. The status flag is carried
/// as `active` in JSON bodies; the filter parameter on queries is `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub active: bool,
    pub address: String,
}

/// Body shape for POST /customers and PUT /customers/{id}.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub address: String,
}

/// Filter values for GET /customers. Text filters are skipped when empty;
/// `status` is only ever sent as `status=true`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerQuery {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub status: bool,
}

fn push_param(qs: &mut String, key: &str, value: &str) {
    if !qs.is_empty() {
        qs.push('&');
    }
    qs.push_str(key);
    qs.push('=');
    qs.push_str(value);
}

impl CustomerQuery {
    /// Assemble the query string in the fixed order first_name, last_name,
    /// address, status. Values are appended verbatim; separators appear
    /// only between present parameters.
    pub fn query_string(&self) -> String {
        let mut qs = String::new();
        if !self.first_name.is_empty() {
            push_param(&mut qs, "first_name", &self.first_name);
        }
        if !self.last_name.is_empty() {
            push_param(&mut qs, "last_name", &self.last_name);
        }
        if !self.address.is_empty() {
            push_param(&mut qs, "address", &self.address);
        }
        if self.status {
            push_param(&mut qs, "status", "true");
        }
        qs
    }
}

/// Mirror of the on-screen form. Values are the raw strings the user sees;
/// the status selector holds "", "true" or "false".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub address: String,
}

impl FormData {
    /// Copy a customer into the form verbatim; the status selector becomes
    /// the literal "true" or "false".
    pub fn populate(&mut self, c: &Customer) {
        self.id = c.id.to_string();
        self.first_name = c.first_name.clone();
        self.last_name = c.last_name.clone();
        self.status = if c.active { "true".into() } else { "false".into() };
        self.address = c.address.clone();
    }

    /// Blank everything except the id field.
    pub fn clear(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.status.clear();
        self.address.clear();
    }

    pub fn payload(&self) -> CustomerPayload {
        CustomerPayload {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            active: self.status == "true",
            address: self.address.clone(),
        }
    }

    pub fn query(&self) -> CustomerQuery {
        CustomerQuery {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            address: self.address.clone(),
            status: self.status == "true",
        }
    }
}

pub const TABLE_HEADER: [&str; 5] = ["ID", "First Name", "Last Name", "Status", "Address"];

/// One results-table row, in header column order. Booleans render via
/// their default textual form.
pub fn row_cells(c: &Customer) -> [String; 5] {
    [
        c.id.to_string(),
        c.first_name.clone(),
        c.last_name.clone(),
        c.active.to_string(),
        c.address.clone(),
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    // Optional title for the header bar
    #[serde(default)]
    pub header: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            header: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

pub(crate) fn validate_app_config(cfg: &AppConfig) -> Result<(), String> {
    let url = cfg.base_url.trim();
    if url.is_empty() {
        return Err("base_url must not be empty".into());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(format!("base_url must be an http(s) URL: '{url}'"));
    }
    Ok(())
}
