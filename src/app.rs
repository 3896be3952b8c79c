//! app.rs
use crate::handlers::{
    analytics_handler, csv_handler, dashboard_handler, health_endpoint, webhook_handler,
    workflow_handler,
};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_endpoint))
            .service(
                web::scope("/dashboard")
                    .route("/sidebar", web::get().to(dashboard_handler::sidebar_endpoint))
                    .route("/overview", web::get().to(dashboard_handler::overview_endpoint))
                    .route(
                        "/business-analytics",
                        web::get().to(dashboard_handler::business_analytics_endpoint),
                    )
                    .route(
                        "/automations",
                        web::get().to(dashboard_handler::automations_endpoint),
                    )
                    .route(
                        "/automations/actions/{action}",
                        web::post().to(dashboard_handler::quick_action_endpoint),
                    )
                    .route("/clients", web::get().to(dashboard_handler::clients_endpoint))
                    .route("/growth", web::get().to(dashboard_handler::growth_endpoint))
                    .route(
                        "/workflow-status",
                        web::get().to(dashboard_handler::workflow_status_endpoint),
                    ),
            )
            .service(
                web::scope("/settings")
                    .route("", web::get().to(dashboard_handler::get_settings_endpoint))
                    .route("", web::put().to(dashboard_handler::update_settings_endpoint)),
            )
            .service(
                web::scope("/workflows")
                    // plantillas antes que /{id}
                    .route(
                        "/templates",
                        web::get().to(workflow_handler::list_templates_endpoint),
                    )
                    .route(
                        "/templates/{key}",
                        web::get().to(workflow_handler::get_template_endpoint),
                    )
                    .route(
                        "/templates/{key}/deploy",
                        web::post().to(workflow_handler::deploy_template_endpoint),
                    )
                    .route(
                        "/templates/{key}/test",
                        web::post().to(workflow_handler::test_template_endpoint),
                    )
                    .route("", web::get().to(workflow_handler::list_workflows_endpoint))
                    .route("", web::post().to(workflow_handler::create_workflow_endpoint))
                    .route(
                        "/{id}/execute",
                        web::post().to(workflow_handler::execute_workflow_endpoint),
                    ),
            )
            .service(
                web::scope("/executions").route(
                    "/{id}",
                    web::get().to(workflow_handler::execution_status_endpoint),
                ),
            )
            .service(
                web::scope("/webhooks")
                    .route("", web::get().to(webhook_handler::list_webhooks_endpoint))
                    .route("", web::post().to(webhook_handler::create_webhook_endpoint))
                    .route("/{name}", web::get().to(webhook_handler::get_webhook_endpoint))
                    .route(
                        "/{name}/send",
                        web::post().to(webhook_handler::send_webhook_endpoint),
                    ),
            )
            .service(
                web::scope("/csv")
                    .route("/{category}", web::get().to(csv_handler::list_files_endpoint))
                    // merge/upload antes que /{filename}
                    .route(
                        "/{category}/merge",
                        web::post().to(csv_handler::merge_files_endpoint),
                    )
                    .route(
                        "/{category}/upload",
                        web::post().to(csv_handler::upload_file_endpoint),
                    )
                    .route(
                        "/{category}/{filename}",
                        web::get().to(csv_handler::view_file_endpoint),
                    )
                    .route(
                        "/{category}/{filename}",
                        web::put().to(csv_handler::save_file_endpoint),
                    )
                    .route(
                        "/{category}/{filename}",
                        web::delete().to(csv_handler::delete_file_endpoint),
                    )
                    .route(
                        "/{category}/{filename}/download",
                        web::get().to(csv_handler::download_file_endpoint),
                    )
                    .route(
                        "/{category}/{filename}/filter",
                        web::post().to(csv_handler::filter_file_endpoint),
                    ),
            )
            .service(web::scope("/analytics").route(
                "/automations",
                web::get().to(analytics_handler::automation_analytics_endpoint),
            )),
    );
}
