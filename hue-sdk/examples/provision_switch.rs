//! Point a dimmer switch at a group and give the group a default scene.
//!
//! ```text
//! HUE_API_KEY=... HUE_LOG_MODE=development cargo run -p hue-sdk --example provision_switch -- Lounge
//! ```

use hue_sdk::{connect, logging, BridgeConfig, BridgeResource};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging_from_env()?;

    let group_name = std::env::args().nth(1).unwrap_or_else(|| "Lounge".to_string());
    let config = BridgeConfig::from_env().or_else(|_| BridgeConfig::load_default())?;
    let bridge = connect(&config)?;

    let Some(group) = bridge.groups(Some(&group_name))?.into_iter().next() else {
        eprintln!("no group named {}", group_name);
        return Ok(());
    };

    let scene = bridge.ensure_scene(
        &format!("{} default", group_name),
        &group,
        &json!({"on": true, "bri": 200, "ct": 366}),
    )?;
    println!("scene {} covers lights {:?}", scene.id(), scene.light_ids());

    match bridge.find_switch_for_group(&group)? {
        Some(switch) => {
            let rules = bridge.reset_switch_rules(&switch, &group)?;
            println!("{} now drives {} through {} rules", switch.name().unwrap_or("switch"), group_name, rules.len());
        }
        None => println!("no dimmer switch drives {}", group_name),
    }

    Ok(())
}
