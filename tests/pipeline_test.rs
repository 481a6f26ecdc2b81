use anyhow::Result;
use device_lists::app::update_use_case::{update_arcore, update_ligar};
use device_lists::config::{ArcoreConfig, LigarConfig};
use device_lists::error::DeviceListError;
use device_lists::sources::ModelPolicy;
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::tempdir;

fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

fn ligar_config(input: &Path, output: &Path) -> LigarConfig {
    LigarConfig {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        model_policy: ModelPolicy::MultiCandidate,
    }
}

#[tokio::test]
async fn test_arcore_download_drops_empty_and_duplicate_rows() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/arcore_devicelist.csv");
            then.status(200)
                .header("content-type", "text/csv")
                .body("Manufacturer,Model Name\nSamsung,Galaxy S21\nSamsung,Galaxy S21\nApple,");
        })
        .await;

    let temp_dir = tempdir()?;
    let output = temp_dir.path().join("data").join("arcore_devices.json");
    let config = ArcoreConfig {
        url: server.url("/arcore_devicelist.csv"),
        output: output.clone(),
        timeout_seconds: Some(5),
    };

    let result = update_arcore(&config).await?;

    mock.assert_async().await;
    assert_eq!(result.rows_read, 3);
    assert_eq!(result.rows_dropped, 1);
    assert_eq!(result.duplicates, 1);
    assert_eq!(result.unique_records, 1);
    assert_eq!(
        read_json(&output)?,
        json!([{"manufacturer": "Samsung", "model": "Galaxy S21"}])
    );
    Ok(())
}

#[tokio::test]
async fn test_arcore_keeps_first_seen_order_and_exact_case() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/devices.csv");
            then.status(200).body(
                "Brand,Device,Manufacturer,Model Name\n\
                 Google,oriole,Google,Pixel 6\n\
                 Samsung,x1q,Samsung,Galaxy S20\n\
                 Google,oriole,google,pixel 6\n\
                 Google,oriole,Google,Pixel 6\n",
            );
        })
        .await;

    let temp_dir = tempdir()?;
    let output = temp_dir.path().join("arcore.json");
    let config = ArcoreConfig {
        url: server.url("/devices.csv"),
        output: output.clone(),
        timeout_seconds: None,
    };

    update_arcore(&config).await?;

    assert_eq!(
        read_json(&output)?,
        json!([
            {"manufacturer": "Google", "model": "Pixel 6"},
            {"manufacturer": "Samsung", "model": "Galaxy S20"},
            {"manufacturer": "google", "model": "pixel 6"}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_arcore_models_are_newline_stripped_and_placeholders_dropped() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/devices.csv");
            then.status(200).body(
                "Manufacturer,Model Name\n\
                 Acme,\"Widget\nPro\"\n\
                 Acme,-\n\
                 Acme,WidgetPro\n",
            );
        })
        .await;

    let temp_dir = tempdir()?;
    let output = temp_dir.path().join("arcore.json");
    let config = ArcoreConfig {
        url: server.url("/devices.csv"),
        output: output.clone(),
        timeout_seconds: None,
    };

    let result = update_arcore(&config).await?;

    assert_eq!(result.rows_dropped, 1);
    assert_eq!(result.duplicates, 1);
    assert_eq!(
        read_json(&output)?,
        json!([{"manufacturer": "Acme", "model": "WidgetPro"}])
    );
    Ok(())
}

#[tokio::test]
async fn test_arcore_http_error_writes_nothing() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing.csv");
            then.status(404);
        })
        .await;

    let temp_dir = tempdir()?;
    let output = temp_dir.path().join("arcore.json");
    let config = ArcoreConfig {
        url: server.url("/missing.csv"),
        output: output.clone(),
        timeout_seconds: None,
    };

    let err = update_arcore(&config).await.unwrap_err();

    assert!(matches!(err, DeviceListError::HttpStatus { status: 404, .. }));
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_arcore_rejects_non_utf8_body() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/latin1.csv");
            then.status(200).body(vec![b'M', 0xff, 0xfe, b'\n']);
        })
        .await;

    let temp_dir = tempdir()?;
    let config = ArcoreConfig {
        url: server.url("/latin1.csv"),
        output: temp_dir.path().join("arcore.json"),
        timeout_seconds: None,
    };

    let err = update_arcore(&config).await.unwrap_err();
    assert!(matches!(err, DeviceListError::Decode { .. }));
    Ok(())
}

#[tokio::test]
async fn test_ligar_export_maps_status_and_model_columns() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("adaptation.csv");
    let output = temp_dir.path().join("ligar_devices.json");
    std::fs::write(
        &input,
        "Brand,Adapted,Device model name,Model\nAcme,true,-,M100\nAcme,false,Widget Pro,W-200\n",
    )?;

    let result = update_ligar(&ligar_config(&input, &output)).await?;

    assert_eq!(result.unique_records, 3);
    assert_eq!(
        read_json(&output)?,
        json!([
            {"manufacturer": "Acme", "model": "M100", "status": "supported"},
            {"manufacturer": "Acme", "model": "Widget Pro", "status": "unsupported"},
            {"manufacturer": "Acme", "model": "W-200", "status": "unsupported"}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_ligar_single_candidate_policy() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("adaptation.csv");
    let output = temp_dir.path().join("ligar_devices.json");
    std::fs::write(
        &input,
        "Brand,Adapted,Device model name,Model\nAcme,true,-,M100\nAcme,false,Widget Pro,W-200\n",
    )?;

    let mut config = ligar_config(&input, &output);
    config.model_policy = ModelPolicy::SingleCandidate;
    update_ligar(&config).await?;

    assert_eq!(
        read_json(&output)?,
        json!([
            {"manufacturer": "Acme", "model": "M100", "status": "supported"},
            {"manufacturer": "Acme", "model": "Widget Pro", "status": "unsupported"}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_ligar_collapses_case_insensitively_keeping_last() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("adaptation.csv");
    let output = temp_dir.path().join("ligar_devices.json");
    std::fs::write(
        &input,
        "Id,Brand,Adapted,Device model name,Model,Updated at\n\
         1,Acme,false,X1,-,2025-01-01\n\
         2,Other,,Y2,-,2025-01-02\n\
         3,ACME,TRUE,\"x1\n\",-,2025-02-01\n\
         4,,true,Orphan,-,2025-02-02\n",
    )?;

    let result = update_ligar(&ligar_config(&input, &output)).await?;

    assert_eq!(result.rows_dropped, 1);
    assert_eq!(result.duplicates, 1);
    assert_eq!(
        read_json(&output)?,
        json!([
            {"manufacturer": "ACME", "model": "x1", "status": "supported"},
            {"manufacturer": "Other", "model": "Y2", "status": "unknown"}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_ligar_missing_input_writes_nothing() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("absent.csv");
    let output = temp_dir.path().join("ligar_devices.json");

    let err = update_ligar(&ligar_config(&input, &output)).await.unwrap_err();

    assert!(matches!(err, DeviceListError::NotFound(ref p) if p == &input));
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_ligar_export_with_invalid_utf8_is_a_parse_error() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("adaptation.csv");
    let output = temp_dir.path().join("ligar_devices.json");
    std::fs::write(
        &input,
        b"Brand,Adapted,Device model name,Model\nAcme,true,\xff\xfe,M1\n",
    )?;

    let err = update_ligar(&ligar_config(&input, &output)).await.unwrap_err();

    assert!(matches!(err, DeviceListError::Parse(_)), "got {err:?}");
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_rerunning_produces_identical_bytes() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("adaptation.csv");
    let output = temp_dir.path().join("ligar_devices.json");
    std::fs::write(
        &input,
        "Brand,Adapted,Device model name,Model\n\
         Xiaomi,true,小米 11,M2011K2C\n\
         Acme,,Widget,W-1\n\
         acme,false,WIDGET,-\n",
    )?;
    let config = ligar_config(&input, &output);

    update_ligar(&config).await?;
    let first = std::fs::read(&output)?;
    update_ligar(&config).await?;
    let second = std::fs::read(&output)?;

    assert_eq!(first, second);
    assert!(String::from_utf8(first)?.contains("小米 11"));
    Ok(())
}
