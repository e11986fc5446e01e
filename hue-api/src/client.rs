use http_client::{HttpClient, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::resource::{BridgeResource, Resource};
use crate::resources::{Group, Light, Rule, RuleAction, RuleFilter, Scene, Sensor};
use crate::{ApiError, Result};

/// A client for one bridge and one API key
///
/// The client holds no state beyond the bridge address, the key and an HTTP
/// agent; every accessor makes a fresh round trip. Cloning is cheap and
/// clones share the agent's connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use hue_api::BridgeClient;
///
/// let bridge = BridgeClient::new("192.168.1.2", "my-api-key");
/// for mut group in bridge.groups(Some("Lounge"))? {
///     group.set_on(true)?;
/// }
/// # Ok::<(), hue_api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BridgeClient {
    address: String,
    api_key: String,
    http: HttpClient,
}

impl BridgeClient {
    /// Create a client for the bridge at `address` (`host` or `host:port`)
    pub fn new(address: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_http_client(address, api_key, HttpClient::new())
    }

    /// Create a client with a custom HTTP client (for timeout tuning)
    pub fn with_http_client(
        address: impl Into<String>,
        api_key: impl Into<String>,
        http: HttpClient,
    ) -> Self {
        Self {
            address: address.into(),
            api_key: api_key.into(),
            http,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Full URL of an API path such as `/groups/1`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/api/{}{}", self.address, self.api_key, path)
    }

    /// Issue a request against the bridge API
    ///
    /// The bridge reports semantic failures with a 2xx status and a JSON
    /// array whose first element holds an `error` key; those are returned as
    /// [`ApiError::Bridge`] carrying that element.
    pub fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        debug!(%method, path, "bridge request");

        let reply = self.http.request(method, &self.url(path), body)?;

        if let Some(first) = reply.as_array().and_then(|items| items.first()) {
            if first.get("error").is_some() {
                warn!(%method, path, error = %first, "bridge rejected request");
                return Err(ApiError::Bridge(first.clone()));
            }
        }

        Ok(reply)
    }

    pub fn get(&self, path: &str) -> Result<Value> {
        self.call(Method::Get, path, None)
    }

    pub fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.call(Method::Put, path, Some(body))
    }

    pub fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.call(Method::Post, path, Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<Value> {
        self.call(Method::Delete, path, None)
    }

    // ========================================================================
    // Raw collections
    // ========================================================================

    pub fn lights(&self) -> Result<Value> {
        self.get(Light::COLLECTION)
    }

    pub fn config(&self) -> Result<Value> {
        self.get("/config")
    }

    pub fn schedules(&self) -> Result<Value> {
        self.get("/schedules")
    }

    // ========================================================================
    // Typed collections
    // ========================================================================

    /// Lights wrapped as proxies, optionally only those named `name`
    pub fn light_list(&self, name: Option<&str>) -> Result<Vec<Light>> {
        self.collection(name)
    }

    pub fn groups(&self, name: Option<&str>) -> Result<Vec<Group>> {
        self.collection(name)
    }

    pub fn scenes(&self, name: Option<&str>) -> Result<Vec<Scene>> {
        self.collection(name)
    }

    pub fn sensors(&self, name: Option<&str>) -> Result<Vec<Sensor>> {
        self.collection(name)
    }

    /// Rules passing every criterion of `filter`
    pub fn rules(&self, filter: &RuleFilter) -> Result<Vec<Rule>> {
        Ok(self
            .resources(Rule::COLLECTION)?
            .into_iter()
            .filter(|resource| filter.matches(resource))
            .map(|resource| Rule::from_parts(self.clone(), resource))
            .collect())
    }

    /// Create a scene; the proxy wraps the new id and `data` as sent
    pub fn create_scene(&self, data: &Value) -> Result<Scene> {
        self.create(data)
    }

    /// Create a rule; the proxy wraps the new id and `data` as sent
    pub fn create_rule(&self, data: &Value) -> Result<Rule> {
        self.create(data)
    }

    /// Rule action addressed at an arbitrary API path
    pub fn make_action(&self, address: &str, method: Method, body: Value) -> RuleAction {
        RuleAction::new(address, method, body)
    }

    fn collection<T: BridgeResource>(&self, name: Option<&str>) -> Result<Vec<T>> {
        Ok(self
            .resources(T::COLLECTION)?
            .into_iter()
            .filter(|resource| name.map_or(true, |name| resource.name() == Some(name)))
            .map(|resource| T::from_parts(self.clone(), resource))
            .collect())
    }

    fn resources(&self, path: &str) -> Result<Vec<Resource>> {
        match self.get(path)? {
            Value::Object(entries) => entries
                .into_iter()
                .map(|(id, params)| Resource::from_value(id, params))
                .collect(),
            other => Err(ApiError::UnexpectedResponse(format!(
                "{} did not return an object: {}",
                path, other
            ))),
        }
    }

    fn create<T: BridgeResource>(&self, data: &Value) -> Result<T> {
        let Value::Object(attributes) = data else {
            return Err(ApiError::InvalidParameter(format!(
                "{} definition must be a JSON object",
                T::COLLECTION
            )));
        };

        let reply = self.post(T::COLLECTION, data)?;
        let id = created_id(&reply).ok_or_else(|| {
            ApiError::UnexpectedResponse(format!(
                "POST {} returned no success id: {}",
                T::COLLECTION,
                reply
            ))
        })?;

        debug!(collection = T::COLLECTION, id = %id, "created resource");
        Ok(T::from_parts(
            self.clone(),
            Resource::new(id, attributes.clone()),
        ))
    }
}

/// `id` from a `[{"success": {"id": ...}}]` reply
fn created_id(reply: &Value) -> Option<String> {
    reply
        .as_array()?
        .iter()
        .find_map(|item| item.get("success")?.get("id")?.as_str())
        .map(str::to_string)
}
