//! Scene and dimmer switch provisioning against a mock bridge

mod helpers;

use helpers::{api_path, bridge, reply};
use hue_api::provisioning::SCENE_CYCLE_SENSOR_NAME;
use hue_api::{ApiError, BridgeClient, BridgeResource, Group, Resource, Sensor};
use mockito::{Matcher, Server};
use serde_json::{json, Value};

fn proxy<T: BridgeResource>(client: &BridgeClient, id: &str, attributes: Value) -> T {
    T::from_parts(client.clone(), Resource::from_value(id, attributes).unwrap())
}

fn sensors_fixture() -> Value {
    json!({
        "2": {"name": "Hall switch", "type": "ZLLSwitch"},
        "5": {"name": "Hall motion", "type": "ZLLPresence"},
        "9": {"name": SCENE_CYCLE_SENSOR_NAME, "type": "CLIPGenericStatus"}
    })
}

#[test]
fn test_ensure_scene_creates_once() {
    let mut server = Server::new();
    let client = bridge(&server);
    let lounge: Group = proxy(&client, "1", json!({"name": "Lounge", "lights": ["1", "2"]}));
    let params = json!({"on": true, "bri": 144});

    let no_scenes = reply(&mut server, "GET", "/scenes", json!({}), 1);
    let post = server
        .mock("POST", api_path("/scenes").as_str())
        .match_body(Matcher::Json(json!({"recycle": true, "name": "Relax", "lights": ["1", "2"]})))
        .with_status(200)
        .with_body(json!([{"success": {"id": "abc"}}]).to_string())
        .expect(1)
        .create();
    let lightstates: Vec<_> = ["1", "2"]
        .iter()
        .map(|light| {
            server
                .mock("PUT", api_path(&format!("/scenes/abc/lightstates/{}", light)).as_str())
                .match_body(Matcher::Json(params.clone()))
                .with_status(200)
                .with_body(json!([{"success": {"on": true}}]).to_string())
                .expect(1)
                .create()
        })
        .collect();

    let created = client.ensure_scene("Relax", &lounge, &params).unwrap();
    assert_eq!(created.id(), "abc");
    no_scenes.assert();
    no_scenes.remove();

    let _existing = reply(
        &mut server,
        "GET",
        "/scenes",
        json!({"abc": {"name": "Relax", "lights": ["1", "2"]}}),
        1,
    );
    let again = client.ensure_scene("Relax", &lounge, &params).unwrap();

    assert_eq!(again.id(), "abc");
    post.assert();
    for mock in &lightstates {
        mock.assert();
    }
}

#[test]
fn test_find_switch_for_group() {
    let mut server = Server::new();
    let client = bridge(&server);
    let _sensors = reply(&mut server, "GET", "/sensors", sensors_fixture(), 2);
    let _rules = reply(
        &mut server,
        "GET",
        "/rules",
        json!({
            "1": {
                "name": "Hall motion",
                "conditions": [{"address": "/sensors/5/state/presence", "operator": "eq", "value": "true"}],
                "actions": [{"address": "/groups/1/action", "method": "PUT", "body": {"on": true}}]
            },
            "2": {
                "name": "Hall switch on0",
                "conditions": [{"address": "/sensors/2/state/buttonevent", "operator": "eq", "value": "1000"}],
                "actions": [{"address": "/groups/1/action", "method": "PUT", "body": {"on": true}}]
            }
        }),
        2,
    );

    let hall: Group = proxy(&client, "1", json!({"name": "Hall"}));
    let switch = client.find_switch_for_group(&hall).unwrap().unwrap();
    assert_eq!(switch.id(), "2");
    assert_eq!(switch.name(), Some("Hall switch"));

    let attic: Group = proxy(&client, "8", json!({"name": "Attic"}));
    assert!(client.find_switch_for_group(&attic).unwrap().is_none());
}

#[test]
fn test_reset_switch_rules_replaces_bound_rules() {
    let mut server = Server::new();
    let client = bridge(&server);
    let _rules = reply(
        &mut server,
        "GET",
        "/rules",
        json!({
            "4": {
                "name": "old on",
                "conditions": [{"address": "/sensors/2/state/buttonevent", "operator": "eq", "value": "1000"}],
                "actions": []
            },
            "6": {
                "name": "other switch",
                "conditions": [{"address": "/sensors/22/state/buttonevent", "operator": "eq", "value": "1000"}],
                "actions": []
            }
        }),
        1,
    );
    let delete_bound = reply(&mut server, "DELETE", "/rules/4", json!([{"success": "/rules/4 deleted"}]), 1);
    let delete_other = reply(&mut server, "DELETE", "/rules/6", json!([{"success": "/rules/6 deleted"}]), 0);
    let _sensors = reply(&mut server, "GET", "/sensors", sensors_fixture(), 1);
    let create = reply(&mut server, "POST", "/rules", json!([{"success": {"id": "30"}}]), 9);

    let switch: Sensor = proxy(&client, "2", json!({"name": "Hall switch", "type": "ZLLSwitch"}));
    let hall: Group = proxy(&client, "1", json!({"name": "Hall"}));
    let rules = client.reset_switch_rules(&switch, &hall).unwrap();

    delete_bound.assert();
    delete_other.assert();
    create.assert();
    assert_eq!(rules.len(), 9);
    assert_eq!(rules[0].name(), Some("Hall switch dn-long"));
    assert_eq!(rules[4].conditions()[2].address, "/sensors/9/state/status");
}

#[test]
fn test_reset_switch_rules_requires_cycle_sensor() {
    let mut server = Server::new();
    let client = bridge(&server);
    let _rules = reply(&mut server, "GET", "/rules", json!({}), 1);
    let _sensors = reply(&mut server, "GET", "/sensors", json!({"2": {"name": "Hall switch", "type": "ZLLSwitch"}}), 1);
    let create = reply(&mut server, "POST", "/rules", json!([{"success": {"id": "30"}}]), 0);

    let switch: Sensor = proxy(&client, "2", json!({"name": "Hall switch", "type": "ZLLSwitch"}));
    let hall: Group = proxy(&client, "1", json!({"name": "Hall"}));
    let result = client.reset_switch_rules(&switch, &hall);

    assert!(matches!(result, Err(ApiError::NotFound(_))));
    create.assert();
}

#[test]
fn test_rules_with_numeric_condition_values_still_count() {
    let mut server = Server::new();
    let client = bridge(&server);
    let _rules = reply(
        &mut server,
        "GET",
        "/rules",
        json!({
            "4": {
                "name": "hand-written on",
                "conditions": [{"address": "/sensors/2/state/buttonevent", "operator": "eq", "value": 1000}],
                "actions": [{"address": "/groups/1/action", "method": "PUT", "body": {"on": true}}]
            }
        }),
        2,
    );
    let _sensors = reply(&mut server, "GET", "/sensors", sensors_fixture(), 2);
    let delete = reply(&mut server, "DELETE", "/rules/4", json!([{"success": "/rules/4 deleted"}]), 1);
    let _create = reply(&mut server, "POST", "/rules", json!([{"success": {"id": "30"}}]), 9);

    let hall: Group = proxy(&client, "1", json!({"name": "Hall"}));
    let switch = client.find_switch_for_group(&hall).unwrap().unwrap();
    assert_eq!(switch.id(), "2");

    client.reset_switch_rules(&switch, &hall).unwrap();
    delete.assert();
}
