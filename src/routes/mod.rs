pub mod auth;
pub mod comments;
pub mod health;
pub mod reports;
pub mod tags;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::refresh),
    )
    .service(
        web::scope("/users")
            .service(users::me)
            .service(users::update_me)
            .service(users::delete_me),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task_tags)
            .service(tasks::attach_tag)
            .service(tasks::detach_tag)
            .service(comments::create_comment)
            .service(comments::get_comments)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/tags")
            .service(tags::get_tags)
            .service(tags::create_tag)
            .service(tags::get_tag)
            .service(tags::update_tag)
            .service(tags::delete_tag),
    )
    .service(
        web::scope("/comments")
            .service(comments::update_comment)
            .service(comments::delete_comment),
    )
    .service(
        web::scope("/reports")
            .service(reports::get_reports)
            .service(reports::create_report)
            .service(reports::get_report)
            .service(reports::delete_report),
    );
}
