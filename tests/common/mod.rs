#![allow(dead_code)]
use mavlink_crc_extra::*;

pub fn heartbeat() -> MessageDefinition {
    MessageDefinition::new(
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
    )
}

pub fn sys_status() -> MessageDefinition {
    MessageDefinition::new(
        1,
        "SYS_STATUS",
        vec![
            FieldDescriptor::new("onboard_control_sensors_present", "uint32_t"),
            FieldDescriptor::new("onboard_control_sensors_enabled", "uint32_t"),
            FieldDescriptor::new("onboard_control_sensors_health", "uint32_t"),
            FieldDescriptor::new("load", "uint16_t"),
            FieldDescriptor::new("voltage_battery", "uint16_t"),
            FieldDescriptor::new("current_battery", "int16_t"),
            FieldDescriptor::new("battery_remaining", "int8_t"),
            FieldDescriptor::new("drop_rate_comm", "uint16_t"),
            FieldDescriptor::new("errors_comm", "uint16_t"),
            FieldDescriptor::new("errors_count1", "uint16_t"),
            FieldDescriptor::new("errors_count2", "uint16_t"),
            FieldDescriptor::new("errors_count3", "uint16_t"),
            FieldDescriptor::new("errors_count4", "uint16_t"),
            FieldDescriptor::extension("onboard_control_sensors_present_extended", "uint32_t"),
            FieldDescriptor::extension("onboard_control_sensors_enabled_extended", "uint32_t"),
            FieldDescriptor::extension("onboard_control_sensors_health_extended", "uint32_t"),
        ],
    )
}

pub fn attitude() -> MessageDefinition {
    MessageDefinition::new(
        30,
        "ATTITUDE",
        vec![
            FieldDescriptor::new("time_boot_ms", "uint32_t"),
            FieldDescriptor::new("roll", "float"),
            FieldDescriptor::new("pitch", "float"),
            FieldDescriptor::new("yaw", "float"),
            FieldDescriptor::new("rollspeed", "float"),
            FieldDescriptor::new("pitchspeed", "float"),
            FieldDescriptor::new("yawspeed", "float"),
        ],
    )
}

pub fn param_value() -> MessageDefinition {
    MessageDefinition::new(
        22,
        "PARAM_VALUE",
        vec![
            FieldDescriptor::new("param_id", "char[16]"),
            FieldDescriptor::new("param_value", "float"),
            FieldDescriptor::new("param_type", "uint8_t"),
            FieldDescriptor::new("param_count", "uint16_t"),
            FieldDescriptor::new("param_index", "uint16_t"),
        ],
    )
}

pub fn statustext() -> MessageDefinition {
    MessageDefinition::new(
        253,
        "STATUSTEXT",
        vec![
            FieldDescriptor::new("severity", "uint8_t"),
            FieldDescriptor::new("text", "char[50]"),
            FieldDescriptor::extension("id", "uint16_t"),
            FieldDescriptor::extension("chunk_seq", "uint8_t"),
        ],
    )
}

pub fn common() -> Vec<MessageDefinition> {
    vec![heartbeat(), sys_status(), param_value(), attitude(), statustext()]
}
