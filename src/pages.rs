use crate::{
    constants::FLASH_COOKIE,
    forecast::model::{PROFILE_FIELDS, PredictionRecord, Profile, ProfileOptions},
    req::Request,
    res::{Flash, Response},
    utils::{escape_html, format_naira},
};

/// What every page needs besides its own content: the pending flash message
/// and the signed-in account's display name.
#[derive(Default)]
pub struct PageContext {
    pub flash: Option<Flash>,
    pub account_name: Option<String>,
    flash_cookie: bool,
}

impl PageContext {
    pub fn from_request(request: &Request, account_name: Option<&str>) -> Self {
        let cookie = request.cookie(FLASH_COOKIE).filter(|value| !value.is_empty());
        PageContext {
            flash: cookie.and_then(Flash::from_cookie_value),
            account_name: account_name.map(str::to_string),
            flash_cookie: cookie.is_some(),
        }
    }

    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }

    pub fn respond(&self, status_line: &'static str, body: String) -> Response {
        let response = Response::html(status_line, body);
        if self.flash_cookie {
            response.consume_flash()
        } else {
            response
        }
    }
}

fn layout(ctx: &PageContext, title: &str, content: &str) -> String {
    let nav = match &ctx.account_name {
        Some(name) => format!(
            r#"<a href="/forecast">Forecast</a> <a href="/history">History</a> <span class="user">{}</span> <a href="/logout">Logout</a>"#,
            escape_html(name)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };
    let flash = match &ctx.flash {
        Some(flash) => format!(
            r#"<div class="alert alert-{}">{}</div>"#,
            flash.kind.as_str(),
            escape_html(&flash.message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Student Cost Forecast</title>
</head>
<body>
<nav><a href="/">Home</a> <a href="/about">About</a> {nav}</nav>
{flash}
<main>
<h1>{title}</h1>
{content}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn home(ctx: &PageContext) -> String {
    layout(
        ctx,
        "Student Cost Forecast",
        r#"<p>Estimate your yearly cost of living as a student from the spending of students with a profile like yours.</p>
<p><a href="/forecast">Get a forecast</a></p>"#,
    )
}

pub fn about(ctx: &PageContext) -> String {
    layout(
        ctx,
        "About",
        r#"<p>Forecasts are produced by a regression model trained on historical undergraduate expenditure records.
Your profile is matched against past students who share the same gender, year of study, lifestyle,
accommodation, finance source and income situation. Their average spending is fed to the model;
when nobody matches, the average over all students is used instead.</p>"#,
    )
}

pub fn register(ctx: &PageContext) -> String {
    layout(
        ctx,
        "Register",
        r#"<form method="post" action="/register">
<label>Name <input type="text" name="name" required></label>
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Create account</button>
</form>"#,
    )
}

pub fn login(ctx: &PageContext) -> String {
    layout(
        ctx,
        "Login",
        r#"<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>"#,
    )
}

pub fn forecast(
    ctx: &PageContext,
    options: &ProfileOptions,
    selected: Option<&Profile>,
    result: Option<f64>,
    last: Option<&PredictionRecord>,
) -> String {
    let selected_values = selected.map(Profile::values);

    let mut fields = String::new();
    for (i, (name, label)) in PROFILE_FIELDS.iter().enumerate() {
        let current = selected_values.map(|values| values[i]);
        let mut choices = String::new();
        for option in &options[i] {
            let marker = if current == Some(option.as_str()) {
                " selected"
            } else {
                ""
            };
            choices.push_str(&format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                escape_html(option),
                marker
            ));
        }
        fields.push_str(&format!(
            "<label>{} <select name=\"{}\" required>{}</select></label>\n",
            label, name, choices
        ));
    }

    let mut content = format!(
        "<form method=\"post\" action=\"/forecast\">\n{}<button type=\"submit\">Forecast</button>\n</form>",
        fields
    );

    if let Some(cost) = result {
        content.push_str(&format!(
            r#"<p class="result">Based on your profile, your forecasted yearly cost is: {}</p>"#,
            format_naira(cost)
        ));
    } else if let Some(last) = last {
        content.push_str(&format!(
            r#"<p class="last">Your last forecast ({}): {}</p>"#,
            escape_html(&last.created_at),
            format_naira(last.predicted_cost)
        ));
    }

    layout(ctx, "Forecast", &content)
}

pub fn history(ctx: &PageContext, records: &[PredictionRecord]) -> String {
    if records.is_empty() {
        return layout(
            ctx,
            "History",
            r#"<p>No forecasts yet. <a href="/forecast">Make one</a>.</p>"#,
        );
    }

    let mut rows = String::new();
    for record in records {
        rows.push_str("<tr>");
        for value in record.profile().values() {
            rows.push_str(&format!("<td>{}</td>", escape_html(value)));
        }
        rows.push_str(&format!(
            "<td>{}</td><td>{}</td></tr>\n",
            format_naira(record.predicted_cost),
            escape_html(&record.created_at)
        ));
    }

    let mut header = String::new();
    for (_, label) in PROFILE_FIELDS {
        header.push_str(&format!("<th>{}</th>", label));
    }

    layout(
        ctx,
        "History",
        &format!(
            "<table>\n<thead><tr>{}<th>Forecasted cost</th><th>Date</th></tr></thead>\n<tbody>\n{}</tbody>\n</table>",
            header, rows
        ),
    )
}

pub fn message(ctx: &PageContext, title: &str, text: &str) -> String {
    layout(ctx, title, &format!("<p>{}</p>", escape_html(text)))
}
