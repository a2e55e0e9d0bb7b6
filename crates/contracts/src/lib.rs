//! Контракты CRM-консоли: агрегаты домена, DTO и общая логика списков.
//!
//! Crate компилируется и под wasm32 (frontend), и под нативную цель
//! (юнит-тесты), поэтому здесь нет браузерных зависимостей.

pub mod domain;
pub mod shared;
