//! Idempotent provisioning helpers built on the collection accessors
//!
//! None of these are transactional: a failure partway through leaves the
//! bridge with whatever was already written.

use http_client::Method;
use serde_json::{json, Value};
use tracing::info;

use crate::client::BridgeClient;
use crate::resource::BridgeResource;
use crate::resources::rule::RuleCondition;
use crate::resources::{Group, Rule, RuleFilter, Scene, Sensor};
use crate::{ApiError, Result};

/// Sensor `type` of the Hue dimmer switch
pub const SWITCH_MODEL_ID: &str = "ZLLSwitch";

/// Name of the virtual status sensor used to debounce repeated "on" presses
pub const SCENE_CYCLE_SENSOR_NAME: &str = "Dimmer Switch 2 SceneCycle";

/// Schedule the "reset timer" rule re-arms on every button event
pub const RESET_SCHEDULE_PATH: &str = "/schedules/1";

/// `buttonevent` codes reported by the dimmer switch firmware.
///
/// The first digit is the button (1 = on, 2 = brighten, 3 = dim, 4 = off),
/// the last is the event (0 = initial press, 1 = hold, 3 = long release).
pub mod button {
    pub const ON_PRESS: &str = "1000";
    pub const UP_PRESS: &str = "2000";
    pub const UP_HOLD: &str = "2001";
    pub const UP_LONG_RELEASE: &str = "2003";
    pub const DOWN_PRESS: &str = "3000";
    pub const DOWN_HOLD: &str = "3001";
    pub const DOWN_LONG_RELEASE: &str = "3003";
    pub const OFF_PRESS: &str = "4000";
}

/// Transition time, in 100 ms steps, of the brightness steps
const STEP_TRANSITION: u64 = 9;
const HOLD_STEP: i64 = 56;
const PRESS_STEP: i64 = 30;

impl BridgeClient {
    /// Return the scene named `name`, creating it if needed.
    ///
    /// A new scene is recyclable, covers the group's lights, and stores
    /// `light_params` as the state of every one of them.
    pub fn ensure_scene(&self, name: &str, group: &Group, light_params: &Value) -> Result<Scene> {
        if let Some(scene) = self.scenes(Some(name))?.into_iter().next() {
            return Ok(scene);
        }

        info!(scene = name, group = group.id(), "creating scene");
        let scene = self.create_scene(&json!({
            "recycle": true,
            "name": name,
            "lights": group.light_ids(),
        }))?;

        for light in scene.light_ids() {
            scene.lightstate(&light, light_params)?;
        }

        Ok(scene)
    }

    /// Find the dimmer switch whose rules drive `group`.
    ///
    /// Sensors referenced by the conditions of any rule acting on the group's
    /// action path are candidates, in ascending rule-id order (ids compared
    /// as strings); the first one that is a dimmer switch wins.
    pub fn find_switch_for_group(&self, group: &Group) -> Result<Option<Sensor>> {
        let sensors = self.sensors(None)?;

        let mut referenced: Vec<String> = Vec::new();
        for rule in self.rules(&RuleFilter::any())? {
            let drives_group = rule
                .action_addresses()
                .into_iter()
                .any(|address| address == group.action_path());
            if !drives_group {
                continue;
            }

            for address in rule.condition_addresses() {
                if let Some(id) = sensor_id(address) {
                    if !referenced.iter().any(|seen| seen == id) {
                        referenced.push(id.to_string());
                    }
                }
            }
        }

        Ok(referenced.iter().find_map(|id| {
            sensors
                .iter()
                .find(|sensor| sensor.id() == id && sensor.sensor_type() == Some(SWITCH_MODEL_ID))
                .cloned()
        }))
    }

    /// Replace every rule bound to `switch` with the standard dimmer set
    /// controlling `group`.
    ///
    /// Rules with a condition under the switch's button-event path are
    /// deleted first. The scene-cycle sensor must exist.
    pub fn reset_switch_rules(&self, switch: &Sensor, group: &Group) -> Result<Vec<Rule>> {
        for rule in self.rules(&RuleFilter::any())? {
            let bound = rule
                .condition_addresses()
                .into_iter()
                .any(|address| address.starts_with(switch.button_event_path()));
            if bound {
                info!(rule = rule.id(), name = ?rule.name(), "deleting switch rule");
                rule.delete()?;
            }
        }

        let cycle = self
            .sensors(Some(SCENE_CYCLE_SENSOR_NAME))?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("sensor '{}'", SCENE_CYCLE_SENSOR_NAME)))?;

        switch_rules(self, switch, group, &cycle)
            .iter()
            .map(|rule| {
                info!(name = ?rule["name"].as_str(), "creating switch rule");
                self.create_rule(rule)
            })
            .collect()
    }
}

/// Id segment of a `/sensors/{id}/...` address
fn sensor_id(address: &str) -> Option<&str> {
    address.strip_prefix("/sensors/")?.split('/').next()
}

/// Rule definitions binding the dimmer switch buttons to `group`
pub(crate) fn switch_rules(
    bridge: &BridgeClient,
    switch: &Sensor,
    group: &Group,
    cycle: &Sensor,
) -> Vec<Value> {
    let name = switch.name().unwrap_or_default();
    let pressed = |code: &str| {
        vec![
            RuleCondition::new(switch.button_event_path(), "eq", Some(code)),
            RuleCondition::changed(switch.last_updated_path()),
        ]
    };
    let step = |bri_inc: i64| {
        group.make_action(
            Method::Put,
            json!({"transitiontime": STEP_TRANSITION, "bri_inc": bri_inc}),
        )
    };
    let stop = || group.make_action(Method::Put, json!({"bri_inc": 0}));

    let mut on_conditions = pressed(button::ON_PRESS);
    on_conditions.push(RuleCondition::new(cycle.status_path(), "lt", Some("1")));

    vec![
        json!({
            "name": format!("{} dn-long", name),
            "conditions": pressed(button::DOWN_HOLD),
            "actions": [step(-HOLD_STEP)],
        }),
        json!({
            "name": format!("{} dn-press", name),
            "conditions": pressed(button::DOWN_PRESS),
            "actions": [step(-PRESS_STEP)],
        }),
        json!({
            "name": format!("{} reset timer", name),
            "conditions": [RuleCondition::changed(switch.last_updated_path())],
            "actions": [bridge.make_action(
                RESET_SCHEDULE_PATH,
                Method::Put,
                json!({"status": "enabled", "localtime": "PT00:00:10"}),
            )],
        }),
        json!({
            "name": format!("{} dn-rele", name),
            "conditions": pressed(button::DOWN_LONG_RELEASE),
            "actions": [stop()],
        }),
        json!({
            "name": format!("{} on0", name),
            "conditions": on_conditions,
            "actions": [
                group.make_action(Method::Put, json!({"on": true})),
                cycle.make_action(Method::Put, json!({"status": 1})),
            ],
        }),
        json!({
            "name": format!("{} up-press", name),
            "conditions": pressed(button::UP_PRESS),
            "actions": [step(PRESS_STEP)],
        }),
        json!({
            "name": format!("{} off", name),
            "conditions": pressed(button::OFF_PRESS),
            "actions": [
                group.make_action(Method::Put, json!({"on": false})),
                cycle.make_action(Method::Put, json!({"status": 0})),
            ],
        }),
        json!({
            "name": format!("{} up-rele", name),
            "conditions": pressed(button::UP_LONG_RELEASE),
            "actions": [stop()],
        }),
        json!({
            "name": format!("{} up-long", name),
            "conditions": pressed(button::UP_HOLD),
            "actions": [step(HOLD_STEP)],
        }),
    ]
}
