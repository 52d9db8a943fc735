// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod api;
mod cli;
mod config;
mod console;
mod controller;
mod error;
mod locale;
mod report;
mod stats;
mod types;
mod ui;

use std::io;

use config::{ReportPlan, RunMode, RunPlan};
use controller::{FetchPhase, ReportController};

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(2);
    }

    // Resolve the full run plan up front
    let plan = match config::build_run_plan(&args) {
        Ok(plan) => plan,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(2);
        }
    };

    let exit_code = match &plan.mode {
        RunMode::Report(report_plan) => run_report(report_plan, &plan),
        RunMode::ListComponents => run_list_components(&plan),
        RunMode::Dashboard { recent, upcoming } => run_dashboard(&plan, *recent, *upcoming),
    };

    std::process::exit(exit_code);
}

/// Load one report, print it, and write the selected export artifacts.
fn run_report(report_plan: &ReportPlan, plan: &RunPlan) -> i32 {
    let mut controller = ReportController::new();

    // Resolve the payload: saved file when given, otherwise the API
    if let Some(path) = &report_plan.payload_file {
        let payload = match api::load_payload_file(path) {
            Ok(payload) => payload,
            Err(e) => {
                ui::print_error(&e.to_string());
                return 1;
            }
        };
        let Some(ticket) = controller.start(Some(payload.component.id), report_plan.range) else {
            ui::print_error("No component to report on");
            return 1;
        };
        controller.resolve(ticket, Ok(payload));
    } else {
        let Some(ticket) = controller.start(report_plan.component_id, report_plan.range) else {
            ui::print_error("No component to report on");
            return 1;
        };
        let client = api::ApiClient::new(&plan.api_url);
        let result = client.usage_report(ticket.component_id, &report_plan.range);
        controller.resolve(ticket, result);
    }

    let snapshot = controller.snapshot().clone();
    if snapshot.phase == FetchPhase::Failed {
        if let Some(error) = &snapshot.error {
            ui::print_error(error);
        }
        return 1;
    }
    let Some(payload) = &snapshot.payload else {
        ui::print_error("Report did not load");
        return 1;
    };

    let statistics = snapshot.statistics.as_ref();
    if let Err(e) = report::print_report(
        io::stdout(),
        payload,
        statistics,
        &report_plan.range,
        &plan.locale,
        plan.color,
    ) {
        ui::print_error(&format!("Console output failed: {}", e));
        return 1;
    }

    if report_plan.exports.any() && controller.begin_export() {
        let result = report::write_artifacts(
            payload,
            statistics,
            &report_plan.range,
            &plan.locale,
            &plan.raster,
            &plan.out_dir,
            &report_plan.exports,
        );
        controller.finish_export();
        match result {
            Ok(paths) => {
                for path in &paths {
                    ui::saved(path);
                }
            }
            Err(e) => {
                ui::print_error(&format!("Export failed: {}", e));
                return 1;
            }
        }
    }

    0
}

/// Print the component list with stock status and usage counts.
fn run_list_components(plan: &RunPlan) -> i32 {
    let client = api::ApiClient::new(&plan.api_url);
    let components = match client.components() {
        Ok(components) => components,
        Err(e) => {
            ui::print_error(&e.to_string());
            return 1;
        }
    };

    match report::print_components(io::stdout(), &components, &plan.locale, plan.color) {
        Ok(()) => 0,
        Err(e) => {
            ui::print_error(&format!("Console output failed: {}", e));
            1
        }
    }
}

/// Print the dashboard: counts plus recent and upcoming services.
fn run_dashboard(plan: &RunPlan, recent: usize, upcoming: usize) -> i32 {
    let client = api::ApiClient::new(&plan.api_url);

    let stats = match client.dashboard_stats() {
        Ok(stats) => stats,
        Err(e) => {
            ui::print_error(&e.to_string());
            return 1;
        }
    };
    let recent_records = match client.recent_service_records(recent) {
        Ok(records) => records,
        Err(e) => {
            ui::print_error(&e.to_string());
            return 1;
        }
    };
    let upcoming_services = match client.upcoming_services(upcoming) {
        Ok(services) => services,
        Err(e) => {
            ui::print_error(&e.to_string());
            return 1;
        }
    };

    match report::print_dashboard(
        io::stdout(),
        &stats,
        &recent_records,
        &upcoming_services,
        &plan.locale,
        plan.color,
    ) {
        Ok(()) => 0,
        Err(e) => {
            ui::print_error(&format!("Console output failed: {}", e));
            1
        }
    }
}
