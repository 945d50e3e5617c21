//! Human-readable summary of a compiled model

use scenepanel_core::{DataEncoding, Group, Model};
use std::fmt::Write;

/// Render the model as an indented text summary
pub fn render(model: &Model) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    let timezone = if model.timezone.is_empty() {
        "(none)"
    } else {
        model.timezone.as_str()
    };
    writeln!(out, "WiFi:     {}", model.wifi.ssid)?;
    writeln!(out, "Timezone: {}", timezone)?;
    writeln!(
        out,
        "Broker:   {} (user {})",
        model.broker.address, model.broker.username
    )?;
    writeln!(out, "Groups:   {}", model.groups.len())?;

    for group in &model.groups {
        writeln!(
            out,
            "  [{}] {:?} \"{}\" icon={}",
            group.id(),
            group.kind(),
            group.name(),
            group.icon()
        )?;
        match group {
            Group::Switch(g) => {
                for (topic, device) in g.devices.iter() {
                    writeln!(
                        out,
                        "    {} {} get={} set={} on={} off={}",
                        device.id,
                        device.name,
                        topic,
                        device.set_topic,
                        device.on_value,
                        device.off_value
                    )?;
                }
            }
            Group::Sensor(g) => {
                for (topic, device) in g.devices.iter() {
                    write!(
                        out,
                        "    {} {} get={} kind={}",
                        device.id, device.name, topic, device.kind
                    )?;
                    if device.encoding == DataEncoding::Json {
                        let paths: Vec<String> = device
                            .mapped_values
                            .iter()
                            .map(|m| format!("{}<-{}", m.key, m.json_path))
                            .collect();
                        write!(out, " json[{}]", paths.join(", "))?;
                    }
                    writeln!(out)?;
                }
            }
        }
    }

    Ok(out)
}
