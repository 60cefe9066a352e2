/// 64-bit integer fields, written as JSON strings like protobuf JSON does.
const INT64_FIELDS: &[&str] = &[
    ".telemetry.Telemetry.collection_id",
    ".telemetry.Telemetry.collection_start_time",
    ".telemetry.Telemetry.msg_timestamp",
    ".telemetry.Telemetry.collection_end_time",
    ".telemetry.TelemetryField.timestamp",
    ".telemetry.TelemetryField.value_by_type.uint64_value",
    ".telemetry.TelemetryField.value_by_type.sint64_value",
    ".telemetry.TelemetryRowGPB.timestamp",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.packets_received",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.bytes_received",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.packets_sent",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.bytes_sent",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.multicast_packets_received",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.broadcast_packets_received",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.multicast_packets_sent",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.broadcast_packets_sent",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.last_data_time",
    ".cisco_ios_xr_infra_statsd_oper.infra_statistics.interfaces.interface.latest.generic_counters.ifstatsbag_generic.last_discontinuity_time",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto");

    let mut builder = tonic_build::configure()
        .build_server(true)
        .build_client(true) // Used by the integration tests to play the device
        // Decoded messages serialize with their proto field names and every
        // field present; oneofs flatten into their parent as `<field>: value`.
        // Oneof matchers have no leading dot: a full path would also match
        // the oneof's variants as a prefix.
        .type_attribute(
            ".",
            "#[derive(serde::Serialize)]\n#[serde(rename_all = \"snake_case\")]",
        )
        .field_attribute("telemetry.Telemetry.node_id", "#[serde(flatten)]")
        .field_attribute("telemetry.Telemetry.subscription", "#[serde(flatten)]")
        .field_attribute("telemetry.TelemetryField.value_by_type", "#[serde(flatten)]")
        // Unset message fields are left out, as protobuf JSON does
        .field_attribute(
            ".telemetry.Telemetry.data_gpb",
            "#[serde(skip_serializing_if = \"Option::is_none\")]",
        )
        .field_attribute(
            ".telemetry.TelemetryField.value_by_type.bytes_value",
            "#[serde(serialize_with = \"crate::json::as_base64\")]",
        )
        .field_attribute(
            ".telemetry.TelemetryRowGPB.keys",
            "#[serde(serialize_with = \"crate::json::as_base64\")]",
        )
        .field_attribute(
            ".telemetry.TelemetryRowGPB.content",
            "#[serde(serialize_with = \"crate::json::as_base64\")]",
        );

    for path in INT64_FIELDS {
        builder = builder.field_attribute(
            path,
            "#[serde(serialize_with = \"crate::json::as_string\")]",
        );
    }

    builder.compile_protos(
        &[
            "proto/mdt_dialout.proto",
            "proto/telemetry.proto",
            "proto/ifstatsbag_generic.proto",
        ],
        &["proto/"],
    )?;
    Ok(())
}
