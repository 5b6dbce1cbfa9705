//! Network port derivation.
//!
//! A small rules engine mapping plugin instances to the (port, protocol)
//! pairs the agent would open. Each known plugin carries a default port
//! and protocol, an optional enablement predicate and optional property
//! overrides. The service-level HTTP listener contributes one extra entry
//! when enabled.

use std::fmt;

use flb_core::{PropertyList, SectionKind};

use crate::model::{Config, Plugin};

/// Transport protocol of a derived port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("tcp"),
            Protocol::Udp => f.write_str("udp"),
        }
    }
}

/// A network port a configuration would open
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePort {
    pub port: i32,
    pub protocol: Protocol,
    pub kind: SectionKind,
    /// The contributing plugin; `None` for the service HTTP listener
    pub plugin: Option<Plugin>,
}

/// Default HTTP monitoring port when `service.http_server` is enabled
const DEFAULT_HTTP_PORT: i32 = 2020;

/// Per-plugin derivation rule
struct PortRule {
    default_port: i32,
    default_protocol: Protocol,
    enabled: Option<fn(&PropertyList) -> bool>,
    port: Option<fn(&PropertyList) -> Option<i32>>,
    protocol: Option<fn(&PropertyList) -> Option<Protocol>>,
}

impl PortRule {
    const fn listener(default_port: i32, default_protocol: Protocol) -> Self {
        Self {
            default_port,
            default_protocol,
            enabled: None,
            port: None,
            protocol: None,
        }
    }
}

fn input_rule(name: &str) -> Option<PortRule> {
    let rule = match name.to_ascii_lowercase().as_str() {
        "collectd" => PortRule::listener(25826, Protocol::Udp),
        "elasticsearch" => PortRule::listener(9200, Protocol::Tcp),
        "forward" => PortRule {
            enabled: Some(forward_enabled),
            ..PortRule::listener(24224, Protocol::Tcp)
        },
        "http" => PortRule::listener(9880, Protocol::Tcp),
        "cloudflare" => PortRule {
            port: Some(cloudflare_port),
            ..PortRule::listener(9880, Protocol::Tcp)
        },
        "mqtt" => PortRule::listener(1883, Protocol::Tcp),
        "opentelemetry" => PortRule::listener(4318, Protocol::Tcp),
        "prometheus_remote_write" => PortRule::listener(8080, Protocol::Tcp),
        "splunk" => PortRule::listener(8088, Protocol::Tcp),
        "statsd" => PortRule::listener(8125, Protocol::Udp),
        "syslog" => PortRule {
            enabled: Some(syslog_enabled),
            protocol: Some(syslog_protocol),
            ..PortRule::listener(5140, Protocol::Tcp)
        },
        "tcp" => PortRule::listener(5170, Protocol::Tcp),
        "udp" => PortRule::listener(5170, Protocol::Udp),
        _ => return None,
    };
    Some(rule)
}

fn output_rule(name: &str) -> Option<PortRule> {
    let rule = match name.to_ascii_lowercase().as_str() {
        "prometheus_exporter" => PortRule::listener(2021, Protocol::Tcp),
        _ => return None,
    };
    Some(rule)
}

// forward switches to a unix socket when unix_path is set
fn forward_enabled(properties: &PropertyList) -> bool {
    !properties.has("unix_path")
}

// syslog listens only for the explicit network modes
fn syslog_enabled(properties: &PropertyList) -> bool {
    match properties.get_str("mode") {
        Some(mode) => {
            !mode.eq_ignore_ascii_case("unix_udp") && !mode.eq_ignore_ascii_case("unix_tcp")
        }
        None => false,
    }
}

fn syslog_protocol(properties: &PropertyList) -> Option<Protocol> {
    let mode = properties.get_str("mode")?;
    if mode.eq_ignore_ascii_case("udp") {
        Some(Protocol::Udp)
    } else if mode.eq_ignore_ascii_case("tcp") {
        Some(Protocol::Tcp)
    } else {
        None
    }
}

// cloudflare configures its listener as addr host:port
fn cloudflare_port(properties: &PropertyList) -> Option<i32> {
    let addr = properties.get_str("addr")?;
    let (_, port) = addr.rsplit_once(':')?;
    port.parse().ok()
}

fn property_port(properties: &PropertyList) -> Option<i32> {
    i32::try_from(properties.get_i64("port")?).ok()
}

/// Whether `service.http_server` enables the monitoring listener
fn http_server_enabled(service: &PropertyList) -> bool {
    match service.get("http_server") {
        Some(value) => {
            value.as_bool() == Some(true)
                || value
                    .as_str()
                    .is_some_and(|s| s.eq_ignore_ascii_case("on"))
        }
        None => false,
    }
}

/// Derive every port the configuration would open: the service HTTP
/// listener first, then inputs, then outputs, in plugin order
pub fn derive(config: &Config) -> Vec<ServicePort> {
    let mut ports = Vec::new();

    if http_server_enabled(&config.service) {
        let port = config
            .service
            .get_i64("http_port")
            .and_then(|p| i32::try_from(p).ok())
            .unwrap_or(DEFAULT_HTTP_PORT);
        ports.push(ServicePort {
            port,
            protocol: Protocol::Tcp,
            kind: SectionKind::Service,
            plugin: None,
        });
    }

    for (kind, plugins, rule_for) in [
        (
            SectionKind::Input,
            &config.pipeline.inputs,
            input_rule as fn(&str) -> Option<PortRule>,
        ),
        (SectionKind::Output, &config.pipeline.outputs, output_rule),
    ] {
        for plugin in plugins {
            let Some(rule) = rule_for(&plugin.name) else {
                continue;
            };
            if let Some(enabled) = rule.enabled {
                if !enabled(&plugin.properties) {
                    continue;
                }
            }
            let port = rule
                .port
                .and_then(|f| f(&plugin.properties))
                .or_else(|| property_port(&plugin.properties))
                .unwrap_or(rule.default_port);
            let protocol = rule
                .protocol
                .and_then(|f| f(&plugin.properties))
                .unwrap_or(rule.default_protocol);
            ports.push(ServicePort {
                port,
                protocol,
                kind,
                plugin: Some(plugin.clone()),
            });
        }
    }

    ports
}
