//! Handlebars registry for the HTML views.
//!
//! Templates live under `templates/` and are embedded at compile time, so
//! the binary has no runtime file dependencies.

use handlebars::{Handlebars, TemplateError};

const INDEX: &str = include_str!("../templates/index.hbs");
const CLIENTS: &str = include_str!("../templates/clientes.hbs");
const LOAN_TOTAL: &str = include_str!("../templates/total_emprestimos.hbs");
const BRANCH_COVERAGE: &str = include_str!("../templates/clientes_brooklyn.hbs");

pub fn build_registry() -> Result<Handlebars<'static>, Box<TemplateError>> {
    let mut registry = Handlebars::new();
    registry.register_template_string("index", INDEX)?;
    registry.register_template_string("clientes", CLIENTS)?;
    registry.register_template_string("total_emprestimos", LOAN_TOTAL)?;
    registry.register_template_string("clientes_brooklyn", BRANCH_COVERAGE)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn all_templates_compile_and_render() {
        let registry = build_registry().unwrap();

        assert!(registry.render("index", &json!({})).is_ok());

        let page = registry
            .render(
                "clientes",
                &json!({"groups": [{"city": "Rio", "neighborhood": "Centro", "total": 2, "clients": "Ana, Bia"}]}),
            )
            .unwrap();
        assert!(page.contains("Centro"));
        assert!(page.contains("Ana, Bia"));
    }

    #[test]
    fn total_page_is_blank_when_no_loans() {
        let registry = build_registry().unwrap();
        let page = registry
            .render("total_emprestimos", &json!({"total": null}))
            .unwrap();
        assert!(!page.contains("R$"));

        let page = registry
            .render("total_emprestimos", &json!({"total": "350.50"}))
            .unwrap();
        assert!(page.contains("R$ 350.50"));
    }

    #[test]
    fn template_values_are_html_escaped() {
        let registry = build_registry().unwrap();
        let page = registry
            .render(
                "clientes_brooklyn",
                &json!({"branch": "<b>x</b>", "city": "NY", "clients": ["<i>a</i>"]}),
            )
            .unwrap();
        assert!(!page.contains("<b>x</b>"));
        assert!(page.contains("&lt;b&gt;"));
    }
}
