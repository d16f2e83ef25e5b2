//! Client for the generic document API
//!
//! Every record type implements `DocType`, so one set of functions serves
//! all doctypes. Requests carry the session cookie; responses are unwrapped
//! from the `{"data": ...}` envelope and error bodies are turned into the
//! message the backend meant for the user.

use crate::shared::api_utils::api_url;
use contracts::domain::common::DocType;
use contracts::shared::frappe::{
    doc_path, extract_error_message, list_path, resource_path, DataEnvelope, ListQuery,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

fn with_session(builder: RequestBuilder) -> RequestBuilder {
    builder
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json")
}

async fn error_from(resp: Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    extract_error_message(&body).unwrap_or_else(|| format!("HTTP {}", status))
}

async fn read_data<T: DeserializeOwned>(resp: Response) -> Result<T, String> {
    if !resp.ok() {
        return Err(error_from(resp).await);
    }
    let envelope: DataEnvelope<T> = resp.json().await.map_err(|e| e.to_string())?;
    Ok(envelope.data)
}

pub async fn fetch_list<T>(query: &ListQuery) -> Result<Vec<T>, String>
where
    T: DocType + DeserializeOwned,
{
    let path = list_path(T::doctype(), query);
    log::debug!("GET {}", path);
    let resp = with_session(Request::get(&api_url(&path)))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_data(resp).await
}

pub async fn fetch_doc<T>(name: &str) -> Result<T, String>
where
    T: DocType + DeserializeOwned,
{
    let path = doc_path(T::doctype(), name);
    log::debug!("GET {}", path);
    let resp = with_session(Request::get(&api_url(&path)))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_data(resp).await
}

/// Creates a record of `T` from `body` and returns the stored record
pub async fn create_doc<T, B>(body: &B) -> Result<T, String>
where
    T: DocType + DeserializeOwned,
    B: Serialize,
{
    let path = resource_path(T::doctype());
    log::debug!("POST {}", path);
    let resp = with_session(Request::post(&api_url(&path)))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_data(resp).await
}

/// Partial update: only the fields present in `body` change
pub async fn update_doc<T, B>(name: &str, body: &B) -> Result<T, String>
where
    T: DocType + DeserializeOwned,
    B: Serialize,
{
    let path = doc_path(T::doctype(), name);
    log::debug!("PUT {}", path);
    let resp = with_session(Request::put(&api_url(&path)))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_data(resp).await
}

pub async fn delete_doc<T: DocType>(name: &str) -> Result<(), String> {
    let path = doc_path(T::doctype(), name);
    log::debug!("DELETE {}", path);
    let resp = with_session(Request::delete(&api_url(&path)))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if resp.ok() {
        Ok(())
    } else {
        Err(error_from(resp).await)
    }
}
