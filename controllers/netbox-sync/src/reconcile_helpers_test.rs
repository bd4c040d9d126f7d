//! Unit tests for reconcile_helpers module

#[cfg(test)]
mod tests {
    use crate::reconcile_helpers::*;
    use crate::report::{Stage, SyncReport};
    use netbox_client::{Manufacturer, NetBoxError};

    fn manufacturer(id: u64) -> Manufacturer {
        Manufacturer {
            id,
            url: format!("http://netbox/api/dcim/manufacturers/{}/", id),
            display: "Cisco".to_string(),
            name: "Cisco".to_string(),
            slug: "Cisco".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_attempt_passes_success_through() {
        let mut report = SyncReport::new();
        let value = attempt(&mut report, "sw1", Stage::Device, "create device", async {
            Ok::<_, NetBoxError>(7)
        })
        .await;

        assert_eq!(value, Some(7));
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_attempt_records_failure_with_payload() {
        let mut report = SyncReport::new();
        let value: Option<u64> = attempt(&mut report, "sw1", Stage::Dependency, "create site HQ", async {
            Err(NetBoxError::Api("{\"slug\": [\"site with this slug already exists.\"]}".to_string()))
        })
        .await;

        assert_eq!(value, None);
        assert_eq!(report.issues.len(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.device, "sw1");
        assert_eq!(issue.stage, Stage::Dependency);
        assert!(issue.message.starts_with("Failed to create site HQ: rejected by NetBox"));
        assert!(issue.message.contains("already exists"), "payload kept: {}", issue.message);
    }

    #[test]
    fn test_classify_separates_rejections_from_transport() {
        assert_eq!(classify(&NetBoxError::InvalidRequest("empty patch".to_string())), "rejected by NetBox");
        assert_eq!(classify(&NetBoxError::EmptyResponse("POST dcim/devices".to_string())), "empty response");
        assert_eq!(classify(&NetBoxError::Authentication("bad token".to_string())), "not authorized");
    }

    #[test]
    fn test_first_id() {
        assert_eq!(first_id::<Manufacturer>(&[]), None);
        assert_eq!(first_id(&[manufacturer(4), manufacturer(9)]), Some(4));
        assert_eq!(manufacturer(4).url(), "http://netbox/api/dcim/manufacturers/4/");
    }
}
