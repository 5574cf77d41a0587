// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 只读取上下文、不接收请求体的求解路由

use axum::{extract::Extension, Json};
use serde_json::Value;
use std::sync::Arc;

use super::{data, run, Data};
use crate::application::context::SolverContext;
use crate::application::use_cases::{
    arxiv_notes, calibration, categorize, censorship, connections, conversation, database_agent,
    gps, interrogation, keywords, login_form, phone, photos, poligon, research, robot_image,
    vector_search,
};
use crate::domain::models::report::ReportReply;
use crate::presentation::errors::AppError;

type Ctx = Extension<Arc<SolverContext>>;

pub async fn poligon(Extension(ctx): Ctx) -> Result<Json<Data<String>>, AppError> {
    run("poligon", poligon::execute(&ctx))
        .await
        .map(data)
        .map_err(AppError::not_found)
}

pub async fn login_form(Extension(ctx): Ctx) -> Result<Json<Data<String>>, AppError> {
    run("1", login_form::execute(&ctx))
        .await
        .map(data)
        .map_err(AppError::not_found)
}

pub async fn conversation(Extension(ctx): Ctx) -> Result<Json<Data<String>>, AppError> {
    Ok(data(run("2", conversation::execute(&ctx)).await?))
}

pub async fn calibration(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("3", calibration::execute(&ctx)).await?))
}

pub async fn censorship(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("5", censorship::execute(&ctx)).await?))
}

pub async fn interrogation(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("6", interrogation::execute(&ctx)).await?))
}

pub async fn robot_image(Extension(ctx): Ctx) -> Result<Json<Data<String>>, AppError> {
    Ok(data(run("7", robot_image::execute(&ctx)).await?))
}

pub async fn categorize(Extension(ctx): Ctx) -> Result<Json<Data<ReportReply>>, AppError> {
    Ok(data(run("8", categorize::execute(&ctx)).await?))
}

pub async fn arxiv_notes(Extension(ctx): Ctx) -> Result<Json<Data<String>>, AppError> {
    Ok(data(run("9", arxiv_notes::execute(&ctx)).await?))
}

pub async fn keywords(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("301", keywords::execute(&ctx)).await?))
}

pub async fn vector_search(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("302", vector_search::execute(&ctx)).await?))
}

pub async fn datacenters(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("303", database_agent::datacenters(&ctx)).await?))
}

pub async fn explore_database(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("304", database_agent::explore(&ctx)).await?))
}

pub async fn connections(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("305", connections::execute(&ctx)).await?))
}

pub async fn photos(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("401", photos::execute(&ctx)).await?))
}

pub async fn research(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("402", research::execute(&ctx)).await?))
}

pub async fn phone(Extension(ctx): Ctx) -> Result<Json<Data<String>>, AppError> {
    Ok(data(run("501", phone::execute(&ctx)).await?))
}

pub async fn gps(Extension(ctx): Ctx) -> Result<Json<Data<String>>, AppError> {
    Ok(data(run("502", gps::execute(&ctx)).await?))
}

pub async fn phone_conversations(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("503", phone::conversations(&ctx)).await?))
}
