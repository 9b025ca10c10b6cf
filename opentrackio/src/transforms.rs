use serde_json::Value;

use crate::error::ValidationError;
use crate::types::Transform;
use crate::validate::{join, section};

const PATH: &str = "transforms";

/// Chain of transforms from the stage origin to the camera (`transforms`).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Transforms(pub Vec<Transform>);

impl Transforms {
    /// Elements that fail to decode are skipped; the rest keep their order.
    pub fn from_sample(root: &Value, errors: &mut Vec<ValidationError>) -> Option<Self> {
        let value = section(root, &[PATH])?;
        let Some(items) = value.as_array() else {
            errors.push(ValidationError::TypeMismatch {
                path: PATH.to_owned(),
                expected: "array",
            });
            return None;
        };

        let transforms = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| Transform::decode(item, &join(PATH, &i.to_string()), errors))
            .collect();

        Some(Transforms(transforms))
    }

    /// Look up a transform by its `transformId`.
    pub fn find(&self, id: &str) -> Option<&Transform> {
        self.0.iter().find(|t| t.transform_id.as_deref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;
    use serde_json::json;

    fn node(id: &str, x: f64) -> Value {
        json!({
            "translation": {"x": x, "y": 0.0, "z": 0.0},
            "rotation": {"pan": 0.0, "tilt": 0.0, "roll": 0.0},
            "transformId": id
        })
    }

    #[test]
    fn test_chain() {
        let mut root = json!({"transforms": [node("Dolly", 1.0), node("Crane Arm", 2.0)]});
        root["transforms"][1]["parentTransformId"] = json!("Dolly");
        root["transforms"][1]["scale"] = json!({"x": 1.0, "y": 1.0, "z": 1.0});

        let mut errors = Vec::new();
        let transforms = Transforms::from_sample(&root, &mut errors).unwrap();
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(transforms.0.len(), 2);

        let arm = transforms.find("Crane Arm").unwrap();
        assert_eq!(arm.parent_transform_id.as_deref(), Some("Dolly"));
        assert_eq!(arm.scale, Some(Vector3 { x: 1.0, y: 1.0, z: 1.0 }));
        assert!(transforms.find("Camera").is_none());
    }

    #[test]
    fn test_invalid_element_is_skipped() {
        let root = json!({"transforms": [
            node("Dolly", 1.0),
            {"translation": {"x": 1.0, "y": 2.0, "z": 3.0}},
            node("Camera", 3.0)
        ]});
        let mut errors = Vec::new();
        let transforms = Transforms::from_sample(&root, &mut errors).unwrap();
        let ids: Vec<_> = transforms.0.iter().filter_map(|t| t.transform_id.as_deref()).collect();
        assert_eq!(ids, ["Dolly", "Camera"]);
        assert_eq!(
            errors,
            vec![ValidationError::MissingRequired { path: "transforms/1".into() }]
        );
    }

    #[test]
    fn test_non_array() {
        let mut errors = Vec::new();
        assert!(Transforms::from_sample(&json!({"transforms": {}}), &mut errors).is_none());
        assert_eq!(errors[0].to_string(), "field: transforms isn't of type: array");
    }

    #[test]
    fn test_empty_array() {
        let mut errors = Vec::new();
        let transforms = Transforms::from_sample(&json!({"transforms": []}), &mut errors).unwrap();
        assert!(transforms.0.is_empty());
        assert!(errors.is_empty());
    }
}
