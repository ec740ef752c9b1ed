use std::sync::LazyLock;
use tera::Tera;

pub const PAYMENT_FORM_TEMPLATE: &str = "payment_form.html";

/// Templates are compiled into the binary so the server runs from any directory
pub static WEB_TEMPLATES: LazyLock<tera::Result<Tera>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(
        PAYMENT_FORM_TEMPLATE,
        include_str!("../../web/templates/payment_form.html"),
    )?;
    Ok(tera)
});

/// Parses [WEB_TEMPLATES] so a broken template fails at startup
pub fn init_templates() -> anyhow::Result<&'static Tera> {
    WEB_TEMPLATES
        .as_ref()
        .map_err(|e| anyhow::anyhow!("failed to parse web templates: {e}"))
}

/// Renders the payment form posting to `payment_endpoint`
pub fn render_payment_form(payment_endpoint: &str) -> tera::Result<String> {
    let templates = WEB_TEMPLATES
        .as_ref()
        .map_err(|e| tera::Error::msg(format!("web templates unavailable: {e}")))?;

    let mut context = tera::Context::new();
    context.insert("payment_endpoint", payment_endpoint);

    templates.render(PAYMENT_FORM_TEMPLATE, &context)
}
