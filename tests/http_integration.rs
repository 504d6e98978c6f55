//! Integration tests for the Unisphere client and collectors using wiremock
//!
//! The collector is blocking, so every run happens on a blocking thread while
//! the mock server keeps answering on the async runtime.

use serde_json::json;
use vmax_xray::inventory::{Collector, Generation, StepOutcome};
use vmax_xray::report::{MemoryBackend, MemoryDocument, Report, XlsxBackend};
use vmax_xray::resource::{ArraySession, ResourceType};
use vmax_xray::unisphere::UnisphereClient;
use vmax_xray::InventoryError;
use wiremock::matchers::{basic_auth, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SID: &str = "000197800123";
const USER: &str = "smc";
const PASSWORD: &str = "secret";

fn resource_path(endpoint: &str) -> String {
    format!("/univmax/restapi/84/sloprovisioning/symmetrix/{}/{}", SID, endpoint)
}

fn client_for(base_url: &str) -> UnisphereClient {
    UnisphereClient::with_base_url(base_url, SID, USER, PASSWORD, false)
        .expect("client should build")
}

/// Every listing answers with an empty body unless a test mounts a better match
async fn mount_empty_listings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(format!(
            r"^/univmax/restapi/84/sloprovisioning/symmetrix/{}/[a-z]+$",
            SID
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .with_priority(10)
        .mount(server)
        .await;
}

/// Run a collector against the mock server into an in-memory document
async fn collect(
    server: &MockServer,
    collector: Collector,
) -> (vmax_xray::Result<Vec<StepOutcome>>, MemoryDocument) {
    let base_url = format!("{}/univmax/restapi", server.uri());

    tokio::task::spawn_blocking(move || {
        let client = client_for(&base_url);
        let backend = MemoryBackend::new();
        let document = backend.document();
        let result = collector.collect(Report::new(backend), &client);
        let snapshot = document.borrow().clone();
        (result, snapshot)
    })
    .await
    .expect("collection thread should not panic")
}

mod session_tests {
    use super::*;

    /// Listing sends basic auth and returns body with status
    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_returns_body_and_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(resource_path("storagegroup")))
            .and(basic_auth(USER, PASSWORD))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "storageGroupId": ["SG1"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let base_url = format!("{}/univmax/restapi", server.uri());
        let response = tokio::task::spawn_blocking(move || {
            client_for(&base_url).list(ResourceType::StorageGroup, &[])
        })
        .await
        .unwrap()
        .expect("transport should succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.body.unwrap()["storageGroupId"][0], "SG1");
    }

    /// Non-JSON error pages come back as an absent body, not an error
    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_json_body_is_absent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(resource_path("portgroup")))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let base_url = format!("{}/univmax/restapi", server.uri());
        let response = tokio::task::spawn_blocking(move || {
            client_for(&base_url).list(ResourceType::PortGroup, &[])
        })
        .await
        .unwrap()
        .expect("transport should succeed");

        assert_eq!(response.status, 503);
        assert!(response.body.is_none());
    }

    /// Connection failures surface as collection errors for the resource
    #[tokio::test(flavor = "multi_thread")]
    async fn test_unreachable_server_is_a_collection_error() {
        let result = tokio::task::spawn_blocking(|| {
            client_for("http://127.0.0.1:9/univmax/restapi").list(ResourceType::Initiator, &[])
        })
        .await
        .unwrap();

        assert!(matches!(
            result,
            Err(InventoryError::Collection {
                resource: ResourceType::Initiator,
                ..
            })
        ));
    }

    /// Unisphere releases other than 8.4 are refused
    #[tokio::test(flavor = "multi_thread")]
    async fn test_version_gate() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/univmax/restapi/84/system/version"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "version": "V9.1.0.5" })),
            )
            .mount(&server)
            .await;

        let base_url = format!("{}/univmax/restapi", server.uri());
        let result = tokio::task::spawn_blocking(move || client_for(&base_url).check_version())
            .await
            .unwrap();

        match result {
            Err(InventoryError::UnsupportedVersion { found, .. }) => assert_eq!(found, "V9.1.0.5"),
            other => panic!("expected an unsupported version error, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_version_accepted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/univmax/restapi/84/system/version"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "version": "V8.4.0.7" })),
            )
            .mount(&server)
            .await;

        let base_url = format!("{}/univmax/restapi", server.uri());
        let result = tokio::task::spawn_blocking(move || client_for(&base_url).check_version())
            .await
            .unwrap();

        assert!(result.is_ok());
    }
}

mod collection_tests {
    use super::*;

    /// Two listed storage groups become two rows, in listing order
    #[tokio::test(flavor = "multi_thread")]
    async fn test_storage_groups_written_in_order() {
        let server = MockServer::start().await;
        mount_empty_listings(&server).await;

        Mock::given(method("GET"))
            .and(path(resource_path("storagegroup")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "storageGroupId": ["SG1", "SG2"] })),
            )
            .mount(&server)
            .await;

        for (name, vols) in [("SG1", 4), ("SG2", 7)] {
            Mock::given(method("GET"))
                .and(path(format!("{}/{}", resource_path("storagegroup"), name)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "storageGroupId": name,
                    "num_of_vols": vols,
                    "slo": "Diamond",
                    "maskingview": format!("MV_{}", name)
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let (result, document) = collect(&server, Collector::new(Generation::Vmax2)).await;

        let outcomes = result.expect("collection should succeed");
        assert_eq!(outcomes.last().map(|o| o.records), Some(2));

        let sheet = document.sheet("Storage Group").expect("sheet should exist");
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.text(1, 0), Some("SG1"));
        assert_eq!(sheet.text(2, 0), Some("SG2"));
        assert_eq!(sheet.text(2, 9), Some("MV_SG2"));
        assert_eq!(document.close_count, 1);
    }

    /// A failed listing stops the run before any describe call
    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_failure_stops_before_describe() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(resource_path("volume")))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"/volume/.+$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let (result, document) = collect(&server, Collector::new(Generation::Vmax2)).await;

        assert!(matches!(
            result,
            Err(InventoryError::Collection {
                resource: ResourceType::Volume,
                ..
            })
        ));
        assert!(document.sheets.is_empty());
        assert_eq!(document.close_count, 1);
    }

    /// Volumes are listed with the thin device filter and read from the result list
    #[tokio::test(flavor = "multi_thread")]
    async fn test_volume_listing_uses_result_list() {
        let server = MockServer::start().await;
        mount_empty_listings(&server).await;

        Mock::given(method("GET"))
            .and(path(resource_path("volume")))
            .and(query_param("tdev", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "resultList": { "from": 1, "to": 1, "result": [{ "volumeId": "0012A" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/0012A", resource_path("volume"))))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "volumeId": "0012A",
                "cap_gb": 100.0,
                "type": "TDEV",
                "storageGroupId": ["SG1", "SG2"],
                "snapvx_source": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (result, document) = collect(&server, Collector::new(Generation::Vmax2)).await;
        result.expect("collection should succeed");

        let sheet = document.sheet("TDEV").expect("sheet should exist");
        assert_eq!(sheet.text(1, 0), Some("0012A"));
        assert_eq!(sheet.text(1, 11), Some("SG1, SG2"));
        assert_eq!(
            sheet.cell(1, 8),
            Some(&vmax_xray::report::CellValue::Bool(false))
        );
    }

    /// Cascaded groups show the ids of their member hosts
    #[tokio::test(flavor = "multi_thread")]
    async fn test_cascaded_group_hosts() {
        let server = MockServer::start().await;
        mount_empty_listings(&server).await;

        Mock::given(method("GET"))
            .and(path(resource_path("hostgroup")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "hostGroupId": ["CLUSTER1"] })),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/CLUSTER1", resource_path("hostgroup"))))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hostGroupId": "CLUSTER1",
                "num_of_hosts": 2,
                "host": [
                    { "hostId": "H1", "initiator": ["a1"] },
                    { "hostId": "H2", "initiator": ["b1"] }
                ]
            })))
            .mount(&server)
            .await;

        let (result, document) = collect(&server, Collector::new(Generation::Vmax3)).await;
        result.expect("collection should succeed");

        let sheet = document.sheet("Cascaded IG").expect("sheet should exist");
        assert_eq!(sheet.text(1, 1), Some("H1, H2"));
    }

    /// Newer arrays list their storage pools before anything else
    #[tokio::test(flavor = "multi_thread")]
    async fn test_vmax3_pools_sheet_comes_first() {
        let server = MockServer::start().await;
        mount_empty_listings(&server).await;

        Mock::given(method("GET"))
            .and(path(resource_path("srp")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "srpId": ["SRP_1"] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("{}/SRP_1", resource_path("srp"))))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "srpId": "SRP_1",
                "emulation": "FBA",
                "total_usable_cap_gb": 51000.5
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(resource_path("initiator")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "initiatorId": ["10000000c9876543"]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"/initiator/10000000c9876543$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "initiatorId": "10000000c9876543",
                "logged_in": true
            })))
            .mount(&server)
            .await;

        let (result, document) = collect(&server, Collector::new(Generation::Vmax3)).await;
        result.expect("collection should succeed");

        assert_eq!(document.sheet_names(), vec!["SRP", "Initiators"]);
    }

    /// A failing describe call aborts the array
    #[tokio::test(flavor = "multi_thread")]
    async fn test_describe_failure_aborts() {
        let server = MockServer::start().await;
        mount_empty_listings(&server).await;

        Mock::given(method("GET"))
            .and(path(resource_path("maskingview")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "maskingViewId": ["MV1"] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("{}/MV1", resource_path("maskingview"))))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (result, _) = collect(&server, Collector::new(Generation::Vmax2)).await;

        assert!(matches!(
            result,
            Err(InventoryError::Collection {
                resource: ResourceType::MaskingView,
                ..
            })
        ));
    }

    /// The whole pipeline into a real workbook on disk
    #[tokio::test(flavor = "multi_thread")]
    async fn test_xlsx_workbook_written() {
        let server = MockServer::start().await;
        mount_empty_listings(&server).await;

        Mock::given(method("GET"))
            .and(path(resource_path("portgroup")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "portGroupId": ["PG1"] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("{}/PG1", resource_path("portgroup"))))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "portGroupId": "PG1",
                "num_of_ports": 2,
                "symmetrixPortKey": [
                    { "directorId": "FA-1D", "portId": "4" },
                    { "directorId": "FA-2D", "portId": "4" }
                ]
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().to_path_buf();
        let base_url = format!("{}/univmax/restapi", server.uri());

        let result = tokio::task::spawn_blocking(move || -> vmax_xray::Result<Vec<StepOutcome>> {
            let client = client_for(&base_url);
            let backend = XlsxBackend::create(&out_dir, "Vmax-000197800123.xlsx", SID)?;
            Collector::new(Generation::Vmax2).collect(Report::new(backend), &client)
        })
        .await
        .unwrap();

        result.expect("collection should succeed");
        assert!(dir.path().join("Vmax-000197800123.xlsx").is_file());
    }
}

mod formatter_tests {
    use super::*;

    /// A missing output directory fails before any document exists
    #[test]
    fn test_missing_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = XlsxBackend::create(&missing, "Vmax-000197800123.xlsx", SID);

        assert!(matches!(result, Err(InventoryError::Formatter(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
