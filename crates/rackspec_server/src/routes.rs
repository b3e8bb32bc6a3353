use std::fmt;

use actix_web::{delete, get, post, web, HttpResponse};
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use rackspec_core::SpecField;
use rackspec_engine::{
    record_set_workbook, scrape_url, single_record_workbook, ScrapeOutcome, WORKBOOK_MIME,
};

use crate::AppState;

/// Registers every API route on the given service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(scrape_specs)
        .service(list_database)
        .service(download_model)
        .service(delete_model)
        .service(download_all);
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

#[post("/api/specs")]
async fn scrape_specs(
    body: Option<web::Json<ScrapeRequest>>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let url = match body.as_ref().and_then(|payload| payload.url.clone()) {
        Some(url) if !url.trim().is_empty() => url,
        _ => return HttpResponse::BadRequest().json(json!({"error": "Missing URL"})),
    };

    match scrape_url(data.provider.as_ref(), &data.store, &data.settings, &url).await {
        Ok(outcome) => {
            info!(
                "scraped {} as {} (saved: {})",
                url,
                outcome.record.model_name,
                if outcome.newly_stored { "yes" } else { "no" }
            );
            HttpResponse::Ok().json(spec_response(&outcome))
        }
        Err(err) => {
            error!("scrape failed for {url}: {err}");
            server_error(err)
        }
    }
}

#[get("/api/database")]
async fn list_database(data: web::Data<AppState>) -> HttpResponse {
    match data.store.list() {
        Ok(rows) => {
            let body: Vec<Value> = rows
                .iter()
                .map(|row| {
                    json!({
                        "Model": row.model_name,
                        "Date Scraped": row.date_scraped,
                        "URL": row.url,
                    })
                })
                .collect();
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            error!("database listing failed: {err}");
            server_error(err)
        }
    }
}

#[get("/api/download/{model}")]
async fn download_model(path: web::Path<String>, data: web::Data<AppState>) -> HttpResponse {
    let model = path.into_inner();
    let record = match data.store.get_by_model(&model) {
        Ok(record) => record,
        Err(err) => {
            error!("lookup failed for {model}: {err}");
            return server_error(err);
        }
    };
    let Some(record) = record else {
        return HttpResponse::NotFound().json(json!({"error": "Model not found"}));
    };
    match single_record_workbook(&record) {
        Ok(bytes) => workbook_attachment(format!("{model}.xlsx"), bytes),
        Err(err) => {
            error!("export failed for {model}: {err}");
            server_error(err)
        }
    }
}

#[delete("/api/delete/{model}")]
async fn delete_model(path: web::Path<String>, data: web::Data<AppState>) -> HttpResponse {
    let model = path.into_inner();
    match data.store.delete_by_model(&model) {
        Ok(deleted) => {
            info!("deleted {deleted} row(s) for {model}");
            HttpResponse::Ok().json(json!({"status": "deleted"}))
        }
        Err(err) => {
            error!("delete failed for {model}: {err}");
            server_error(err)
        }
    }
}

#[get("/api/download-all")]
async fn download_all(data: web::Data<AppState>) -> HttpResponse {
    let records = match data.store.all_records() {
        Ok(records) => records,
        Err(err) => {
            error!("database dump failed: {err}");
            return server_error(err);
        }
    };
    match record_set_workbook(&records) {
        Ok(bytes) => workbook_attachment("All_Chassis_Specs.xlsx".to_string(), bytes),
        Err(err) => {
            error!("bulk export failed: {err}");
            server_error(err)
        }
    }
}

/// Scrape response body: the model name, the dedup verdict, and one entry
/// per extracted field under its display name. Absent fields are omitted
/// rather than sent as null.
fn spec_response(outcome: &ScrapeOutcome) -> Value {
    let mut body = Map::new();
    body.insert(
        "Model".to_string(),
        Value::String(outcome.record.model_name.clone()),
    );
    let saved = if outcome.newly_stored { "Yes" } else { "No" };
    body.insert("Saved".to_string(), Value::String(saved.to_string()));
    for field in SpecField::ALL {
        if let Some(value) = outcome.record.fields.get(field) {
            body.insert(
                field.display_name().to_string(),
                Value::String(value.to_string()),
            );
        }
    }
    Value::Object(body)
}

fn workbook_attachment(filename: String, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(WORKBOOK_MIME)
        .append_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(bytes)
}

fn server_error(err: impl fmt::Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({"error": err.to_string()}))
}
