//! Business settings.
//!
//! Read once at startup (flags or environment) and passed explicitly to the
//! report builders.

use std::net::IpAddr;

use clap::Args;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_BUSINESS_NAME: &str = "My POS System";
const BUSINESS_NAME_MAX: usize = 200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("business name must be 1..={BUSINESS_NAME_MAX} characters")]
    BusinessName,

    #[error("{field} is not a valid IP address: '{value}'")]
    PrinterAddress { field: &'static str, value: String },
}

/// Raw settings as given on the command line or in the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// Business name printed in report headers.
    #[arg(long, env = "MENUCOST_BUSINESS_NAME")]
    pub business_name: Option<String>,

    /// Contact phone printed in report headers.
    #[arg(long, env = "MENUCOST_PHONE")]
    pub phone: Option<String>,

    /// Receipt printer address.
    #[arg(long, env = "MENUCOST_RECEIPT_PRINTER_IP")]
    pub receipt_printer_ip: Option<String>,

    /// Kitchen label printer address.
    #[arg(long, env = "MENUCOST_LABEL_PRINTER_IP")]
    pub label_printer_ip: Option<String>,
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub business_name: String,
    pub phone: Option<String>,
    pub receipt_printer_ip: Option<IpAddr>,
    pub label_printer_ip: Option<IpAddr>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            phone: None,
            receipt_printer_ip: None,
            label_printer_ip: None,
        }
    }
}

fn printer_address(field: &'static str, value: Option<&str>) -> Result<Option<IpAddr>, ConfigError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.parse().map(Some).map_err(|_| ConfigError::PrinterAddress {
            field,
            value: v.to_string(),
        }),
        None => Ok(None),
    }
}

impl TryFrom<SettingsArgs> for Settings {
    type Error = ConfigError;

    fn try_from(args: SettingsArgs) -> Result<Self, Self::Error> {
        let business_name = match args.business_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() || name.chars().count() > BUSINESS_NAME_MAX {
                    return Err(ConfigError::BusinessName);
                }
                name
            }
            None => DEFAULT_BUSINESS_NAME.to_string(),
        };

        Ok(Self {
            business_name,
            phone: args.phone.filter(|p| !p.trim().is_empty()),
            receipt_printer_ip: printer_address(
                "receipt_printer_ip",
                args.receipt_printer_ip.as_deref(),
            )?,
            label_printer_ip: printer_address("label_printer_ip", args.label_printer_ip.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_args_give_defaults() {
        let settings = Settings::try_from(SettingsArgs::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn printer_addresses_are_parsed() {
        let settings = Settings::try_from(SettingsArgs {
            business_name: Some("  Corner Café ".to_string()),
            phone: Some("+7 700 000 00 00".to_string()),
            receipt_printer_ip: Some("192.168.1.50".to_string()),
            label_printer_ip: Some("".to_string()),
        })
        .unwrap();
        assert_eq!(settings.business_name, "Corner Café");
        assert_eq!(settings.receipt_printer_ip, Some("192.168.1.50".parse().unwrap()));
        assert_eq!(settings.label_printer_ip, None);
    }

    #[test]
    fn bad_printer_address_is_rejected() {
        let err = Settings::try_from(SettingsArgs {
            label_printer_ip: Some("printer.local:9100".to_string()),
            ..SettingsArgs::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::PrinterAddress {
                field: "label_printer_ip",
                value: "printer.local:9100".to_string()
            }
        );
    }

    #[test]
    fn blank_business_name_is_rejected() {
        let err = Settings::try_from(SettingsArgs {
            business_name: Some("   ".to_string()),
            ..SettingsArgs::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::BusinessName);
    }
}
