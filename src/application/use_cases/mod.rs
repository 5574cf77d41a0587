// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 每个路由一条线性流水线

pub mod arxiv_notes;
pub mod calibration;
pub mod categorize;
pub mod censorship;
pub mod connections;
pub mod conversation;
pub mod database_agent;
pub mod drone;
pub mod gps;
pub mod interrogation;
pub mod keywords;
pub mod login_form;
pub mod phone;
pub mod photos;
pub mod poligon;
pub mod research;
pub mod robot_image;
pub mod site_navigator;
pub mod vector_search;
