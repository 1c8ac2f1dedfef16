use base64::{Engine, engine::general_purpose::STANDARD};
use gainz_app::{Artifact, ArtifactSink, Delivery, SinkError};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    pub name: String,
    pub media_type: String,
    pub data: String,
}

impl From<&Artifact> for EncodedArtifact {
    fn from(artifact: &Artifact) -> Self {
        Self {
            name: artifact.name.clone(),
            media_type: artifact.media_type.clone(),
            data: STANDARD.encode(&artifact.bytes),
        }
    }
}

/// Returns the artifacts inline as a JSON array with base64 encoded data.
#[derive(Default)]
pub struct Base64Json;

impl ArtifactSink for Base64Json {
    fn deliver(&self, artifacts: Vec<Artifact>) -> Result<Delivery, SinkError> {
        let encoded = artifacts
            .iter()
            .map(EncodedArtifact::from)
            .collect::<Vec<_>>();
        serde_json::to_string(&encoded)
            .map(Delivery::Json)
            .map_err(|err| SinkError::Encoding(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::tests::data::artifacts;

    use super::*;

    #[test]
    fn test_deliver() {
        let Delivery::Json(json) = Base64Json.deliver(artifacts()).unwrap() else {
            panic!("unexpected delivery")
        };

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&json).unwrap(),
            json!([
                {
                    "name": "ex_Bench Press",
                    "media_type": "image/svg+xml",
                    "data": "PHN2Zz5iZW5jaDwvc3ZnPg=="
                },
                {
                    "name": "mg_Chest",
                    "media_type": "image/svg+xml",
                    "data": "PHN2Zz5jaGVzdDwvc3ZnPg=="
                }
            ])
        );
    }

    #[test]
    fn test_deliver_decodes_to_artifact_bytes() {
        let Delivery::Json(json) = Base64Json.deliver(artifacts()).unwrap() else {
            panic!("unexpected delivery")
        };

        let encoded = serde_json::from_str::<Vec<EncodedArtifact>>(&json).unwrap();

        assert_eq!(
            encoded
                .iter()
                .map(|a| STANDARD.decode(&a.data).unwrap())
                .collect::<Vec<_>>(),
            artifacts().into_iter().map(|a| a.bytes).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_deliver_nothing() {
        assert_eq!(
            Base64Json.deliver(vec![]).unwrap(),
            Delivery::Json("[]".to_string())
        );
    }
}
