//! Vault resource models and their display descriptions.

use crate::output::{Describe, DisplayValue, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Filters for `accounts list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountQuery {
    pub search: Option<String>,
    pub safe: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub user_name: Option<String>,
    pub platform_id: String,
    pub safe_name: String,
    pub secret_type: Option<String>,
    pub platform_account_properties: BTreeMap<String, serde_json::Value>,
    pub secret_management: SecretManagement,
    pub created_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecretManagement {
    pub automatic_management_enabled: bool,
    pub manual_management_reason: Option<String>,
    pub status: Option<String>,
    pub last_modified_time: Option<i64>,
}

impl Describe for Account {
    fn describe(&self) -> DisplayValue {
        let properties: Vec<(String, DisplayValue)> = self
            .platform_account_properties
            .iter()
            .map(|(k, v)| (k.clone(), json_to_display(v)))
            .collect();
        Record::new()
            .field_as("id", "id", self.id.clone())
            .field_as("name", "name", self.name.clone())
            .field_as("user_name", "userName", self.user_name.clone())
            .field_as("address", "address", self.address.clone())
            .field_as("safe_name", "safeName", self.safe_name.clone())
            .field_as("platform_id", "platformId", self.platform_id.clone())
            .field_as("secret_type", "secretType", self.secret_type.clone())
            .field_as(
                "automatic_management",
                "automaticManagementEnabled",
                self.secret_management.automatic_management_enabled,
            )
            .field_as(
                "management_status",
                "status",
                self.secret_management.status.clone(),
            )
            .field_as(
                "last_modified_time",
                "lastModifiedTime",
                self.secret_management.last_modified_time,
            )
            .field_as("created_time", "createdTime", self.created_time)
            .field_as(
                "platform_account_properties",
                "platformAccountProperties",
                DisplayValue::Map(properties),
            )
            .describe()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafeCreator {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Safe {
    pub safe_url_id: String,
    pub safe_name: String,
    pub safe_number: Option<i64>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub creator: Option<SafeCreator>,
    pub olac_enabled: bool,
    #[serde(rename = "managingCPM")]
    pub managing_cpm: Option<String>,
    pub number_of_versions_retention: Option<i64>,
    pub number_of_days_retention: Option<i64>,
    pub creation_time: Option<i64>,
}

impl Describe for Safe {
    fn describe(&self) -> DisplayValue {
        Record::new()
            .field_as("safe_name", "safeName", self.safe_name.clone())
            .field_as("description", "description", self.description.clone())
            .field_as("location", "location", self.location.clone())
            .field_as(
                "creator",
                "creator",
                self.creator.as_ref().map(|c| c.name.clone()),
            )
            .field_as("olac_enabled", "olacEnabled", self.olac_enabled)
            .field_as("managing_cpm", "managingCPM", self.managing_cpm.clone())
            .field_as(
                "versions_retention",
                "numberOfVersionsRetention",
                self.number_of_versions_retention,
            )
            .field_as(
                "days_retention",
                "numberOfDaysRetention",
                self.number_of_days_retention,
            )
            .field_as("creation_time", "creationTime", self.creation_time)
            .describe()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub source: Option<String>,
    pub user_type: Option<String>,
    pub component_user: bool,
    pub suspended: bool,
    pub enable_user: bool,
    pub location: Option<String>,
    pub vault_authorization: Vec<String>,
    pub last_successful_login_date: Option<i64>,
}

impl Describe for User {
    fn describe(&self) -> DisplayValue {
        Record::new()
            .field_as("id", "id", self.id)
            .field_as("username", "username", self.username.clone())
            .field_as("source", "source", self.source.clone())
            .field_as("user_type", "userType", self.user_type.clone())
            .field_as("location", "location", self.location.clone())
            .field_as("enabled", "enableUser", self.enable_user)
            .field_as("suspended", "suspended", self.suspended)
            .field_as("component_user", "componentUser", self.component_user)
            .field_as(
                "last_login",
                "lastSuccessfulLoginDate",
                self.last_successful_login_date,
            )
            .field_as(
                "vault_authorization",
                "vaultAuthorization",
                self.vault_authorization.clone(),
            )
            .describe()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformGeneral {
    pub id: String,
    pub name: String,
    pub system_type: Option<String>,
    pub active: bool,
    pub description: Option<String>,
    #[serde(rename = "platformBaseID")]
    pub platform_base_id: Option<String>,
    pub platform_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformProperty {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformProperties {
    pub required: Vec<PlatformProperty>,
    pub optional: Vec<PlatformProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub general: PlatformGeneral,
    pub properties: PlatformProperties,
}

impl Describe for Platform {
    fn describe(&self) -> DisplayValue {
        let names = |props: &[PlatformProperty]| -> Vec<String> {
            props.iter().map(|p| p.name.clone()).collect()
        };
        Record::new()
            .field_as("id", "id", self.general.id.clone())
            .field_as("name", "name", self.general.name.clone())
            .field_as("system_type", "systemType", self.general.system_type.clone())
            .field_as("platform_type", "platformType", self.general.platform_type.clone())
            .field_as("active", "active", self.general.active)
            .field_as("description", "description", self.general.description.clone())
            .field_as(
                "required_properties",
                "requiredProperties",
                names(&self.properties.required),
            )
            .field_as(
                "optional_properties",
                "optionalProperties",
                names(&self.properties.optional),
            )
            .describe()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthenticationMethodInfo {
    pub id: String,
    pub enabled: bool,
}

/// Result of the unauthenticated server verification endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServerInfo {
    pub application_name: String,
    pub server_name: String,
    pub server_id: String,
    pub authentication_methods: Vec<AuthenticationMethodInfo>,
}

impl Describe for ServerInfo {
    fn describe(&self) -> DisplayValue {
        let enabled: Vec<String> = self
            .authentication_methods
            .iter()
            .filter(|m| m.enabled)
            .map(|m| m.id.clone())
            .collect();
        Record::new()
            .field_as("server_name", "ServerName", self.server_name.clone())
            .field_as("server_id", "ServerId", self.server_id.clone())
            .field_as(
                "application_name",
                "ApplicationName",
                self.application_name.clone(),
            )
            .field_as("authentication_methods", "AuthenticationMethods", enabled)
            .describe()
    }
}

/// Credential returned by the central credential provider.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CcpCredential {
    pub content: String,
    pub user_name: Option<String>,
    pub address: Option<String>,
}

impl fmt::Debug for CcpCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CcpCredential")
            .field("content", &"***")
            .field("user_name", &self.user_name)
            .field("address", &self.address)
            .finish()
    }
}

fn json_to_display(value: &serde_json::Value) -> DisplayValue {
    match value {
        serde_json::Value::Null => DisplayValue::Null,
        serde_json::Value::Bool(b) => DisplayValue::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => DisplayValue::Int(i),
            None => n
                .as_f64()
                .map(DisplayValue::Float)
                .unwrap_or_else(|| DisplayValue::text(n.to_string())),
        },
        serde_json::Value::String(s) => DisplayValue::text(s.clone()),
        serde_json::Value::Array(items) => {
            DisplayValue::List(items.iter().map(json_to_display).collect())
        }
        serde_json::Value::Object(map) => DisplayValue::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_display(v)))
                .collect(),
        ),
    }
}
