//! Типизированный клиент REST-коллекций.
//!
//! Все страницы ходят к API через эти функции; ошибки сети, статуса и
//! парсинга различимы по типу и превращаются страницей в уведомление.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::api_utils::api_url;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Ошибка сети: {0}")]
    Network(String),
    #[error("Ошибка сервера: {0}")]
    Status(u16),
    #[error("Ошибка парсинга: {0}")]
    Decode(String),
}

/// Загрузить коллекцию целиком ("/api/<resource>")
pub async fn fetch_collection<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, ApiError> {
    let response = Request::get(&api_url(path))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Загрузить одну запись ("/api/<resource>/<id>")
pub async fn fetch_by_id<T: DeserializeOwned>(path: &str, id: &str) -> Result<T, ApiError> {
    let response = Request::get(&api_url(&format!("{}/{}", path, id)))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Создать запись
pub async fn create<T, P>(path: &str, payload: &P) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    P: Serialize,
{
    let response = Request::post(&api_url(path))
        .json(payload)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Обновить запись по id
pub async fn update<T, P>(path: &str, id: &str, payload: &P) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    P: Serialize,
{
    let response = Request::put(&api_url(&format!("{}/{}", path, id)))
        .json(payload)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Удалить запись по id
pub async fn remove(path: &str, id: &str) -> Result<(), ApiError> {
    let response = Request::delete(&api_url(&format!("{}/{}", path, id)))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(())
}

/// Удалить набор записей. Удаляет по одной; первая ошибка прерывает
/// пакет, уже удалённые записи пропадут при перечитывании коллекции.
pub async fn remove_many(path: &str, ids: &[String]) -> Result<(), ApiError> {
    for id in ids {
        remove(path, id).await?;
    }
    Ok(())
}
