/*!
Discovery endpoints.

  discovery components         GET  /cocos/discovery/components
  discovery assets             GET  /cocos/discovery/assets
  discovery assets-by-type     POST /cocos/discovery/assets-by-type  (payload)
*/

use clap::Args;
use std::fmt;

use super::input::InputError;
use super::payload::PayloadArgs;
use crate::transport::ApiRequest;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DiscoveryKind {
    /// Available component types
    Components,
    /// Available asset types
    Assets,
    /// Assets of a given type (takes a JSON payload)
    AssetsByType,
}

impl DiscoveryKind {
    pub fn path(&self) -> &'static str {
        match self {
            DiscoveryKind::Components => "/cocos/discovery/components",
            DiscoveryKind::Assets => "/cocos/discovery/assets",
            DiscoveryKind::AssetsByType => "/cocos/discovery/assets-by-type",
        }
    }

    /// Only `assets-by-type` carries a body.
    pub fn takes_payload(&self) -> bool {
        matches!(self, DiscoveryKind::AssetsByType)
    }
}

impl fmt::Display for DiscoveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiscoveryKind::Components => "components",
            DiscoveryKind::Assets => "assets",
            DiscoveryKind::AssetsByType => "assets-by-type",
        };
        f.write_str(s)
    }
}

#[derive(Args, Debug)]
pub struct DiscoveryArgs {
    /// Discovery endpoint
    #[arg(value_enum, value_name = "TYPE")]
    pub kind: DiscoveryKind,

    // Sent for assets-by-type only.
    #[command(flatten)]
    pub payload: PayloadArgs,
}

impl DiscoveryArgs {
    /// The payload of the GET variants is ignored without being parsed.
    pub fn request(&self) -> Result<ApiRequest, InputError> {
        if self.kind.takes_payload() {
            Ok(ApiRequest::post(self.kind.path(), self.payload.body()?))
        } else {
            Ok(ApiRequest::get(self.kind.path()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;
    use clap::ValueEnum;

    #[test]
    fn value_names_match_display() {
        for kind in DiscoveryKind::value_variants() {
            let pv = kind.to_possible_value().unwrap();
            assert_eq!(pv.get_name(), kind.to_string());
            assert!(kind.path().ends_with(pv.get_name()));
        }
    }

    #[test]
    fn only_assets_by_type_posts() {
        for kind in DiscoveryKind::value_variants() {
            let args = DiscoveryArgs {
                kind: *kind,
                payload: PayloadArgs {
                    json: Some(r#"{"type":"cc.Prefab"}"#.into()),
                    file: None,
                },
            };
            let req = args.request().unwrap();
            if kind.takes_payload() {
                assert_eq!(req.method, Method::Post);
                assert_eq!(req.body, Some(serde_json::json!({"type": "cc.Prefab"})));
            } else {
                assert_eq!(req.method, Method::Get);
                assert!(req.body.is_none());
            }
        }
    }

    #[test]
    fn get_variants_ignore_malformed_payload() {
        let args = DiscoveryArgs {
            kind: DiscoveryKind::Components,
            payload: PayloadArgs {
                json: Some("{".into()),
                file: None,
            },
        };
        assert!(args.request().is_ok());
    }
}
