use mavlink_crc_extra::{FieldDescriptor, MessageDefinition};

fn main() {
    let heartbeat = MessageDefinition::new(
        0,
        "HEARTBEAT",
        vec![
            FieldDescriptor::new("type", "uint8_t"),
            FieldDescriptor::new("autopilot", "uint8_t"),
            FieldDescriptor::new("base_mode", "uint8_t"),
            FieldDescriptor::new("custom_mode", "uint32_t"),
            FieldDescriptor::new("system_status", "uint8_t"),
            FieldDescriptor::new("mavlink_version", "uint8_t_mavlink_version"),
        ],
    );

    let metadata = heartbeat.metadata().expect("HEARTBEAT is well formed");
    println!("{} crc extra: {}", metadata.name, metadata.crc_extra);
    for field in &metadata.fields {
        println!("  offset={:2}: {} ({})", field.offset, field.name, field.type_string);
    }
}
