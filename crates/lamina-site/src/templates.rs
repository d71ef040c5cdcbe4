//! Template engine for rendering component pages.
//!
//! Each component is rendered in two stages: the component template turns
//! one entry's fields into body markup, and the layout template wraps that
//! body in a page shell that also receives the full component list for
//! navigation.

use minijinja::{context, Environment, Error, ErrorKind, Value};

use lamina_aggregate::ComponentEntry;

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_filter("upper_first", upper_first);
        env.add_filter("mixin_signature", mixin_signature);

        env.add_template_owned("component.html".to_string(), COMPONENT_TEMPLATE.to_string())
            .expect("Failed to add component template");

        env.add_template_owned("layout.html".to_string(), LAYOUT_TEMPLATE.to_string())
            .expect("Failed to add layout template");

        Self { env }
    }

    /// Stage one: render a single component's body markup.
    pub fn render_component(&self, name: &str, entry: &ComponentEntry) -> Result<String, Error> {
        let tmpl = self.env.get_template("component.html")?;

        tmpl.render(context! {
            name => name,
            html => &entry.html,
            variables => &entry.variables,
            mixins => &entry.mixins,
            functions => &entry.functions,
            scripts => &entry.scripts,
        })
    }

    /// Stage two: wrap a rendered body in the page layout. `components` is
    /// the full component list, in tree order, for the navigation sidebar.
    pub fn render_layout(
        &self,
        title: &str,
        name: &str,
        body: &str,
        components: &[String],
    ) -> Result<String, Error> {
        let tmpl = self.env.get_template("layout.html")?;

        tmpl.render(context! {
            title => title,
            name => name,
            body => body,
            components => components,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase the first character.
fn upper_first(s: String) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render a mixin doc as a call signature, e.g. `@mixin primary($size) { }`.
fn mixin_signature(mixin: Value) -> Result<String, Error> {
    let name = mixin.get_attr("name")?;
    let name = name.as_str().ok_or_else(|| {
        Error::new(ErrorKind::InvalidOperation, "mixin doc has no name")
    })?;

    let mut params: Vec<String> = Vec::new();
    if let Ok(parameters) = mixin.get_attr("parameters") {
        if let Ok(iter) = parameters.try_iter() {
            for param in iter {
                if let Some(p) = param.get_attr("name")?.as_str() {
                    params.push(format!("${}", p));
                }
            }
        }
    }

    if params.is_empty() {
        Ok(format!("@mixin {} {{ }}", name))
    } else {
        Ok(format!("@mixin {}({}) {{ }}", name, params.join(", ")))
    }
}

const COMPONENT_TEMPLATE: &str = r##"<article class="component" id="{{ name }}">
  <header class="component-header">
    <h1>{{ name | upper_first }}</h1>
  </header>

  <section class="component-docs">
    {{ html | safe }}
  </section>

  {% if variables %}
  <section class="sass-variables">
    <h2>Sass Variables</h2>
    <dl>
    {% for variable in variables %}
      <dt><code>${{ variable.name }}</code></dt>
      <dd>{% if variable.description %}{{ variable.description }}{% endif %}</dd>
    {% endfor %}
    </dl>
  </section>
  {% endif %}

  {% if mixins %}
  <section class="sass-mixins">
    <h2>Sass Mixins</h2>
    {% for mixin in mixins %}
    <div class="mixin">
      <pre><code>{{ mixin | mixin_signature }}</code></pre>
      {% if mixin.description %}<p>{{ mixin.description }}</p>{% endif %}
    </div>
    {% endfor %}
  </section>
  {% endif %}

  {% if functions %}
  <section class="sass-functions">
    <h2>Sass Functions</h2>
    <dl>
    {% for function in functions %}
      <dt><code>{{ function.name }}()</code></dt>
      <dd>{% if function.description %}{{ function.description }}{% endif %}</dd>
    {% endfor %}
    </dl>
  </section>
  {% endif %}

  {% if scripts %}
  <section class="javascript">
    <h2>JavaScript</h2>
    <dl>
    {% for script in scripts %}
      <dt><code>{{ script.kind }} {{ script.name }}</code></dt>
      <dd>{% if script.description %}{{ script.description }}{% endif %}</dd>
    {% endfor %}
    </dl>
  </section>
  {% endif %}
</article>"##;

const LAYOUT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ name | upper_first }} - {{ title }}</title>
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      <div class="nav-header">{{ title }}</div>
      <ul class="nav-list">
      {% for component in components %}
        <li class="nav-item{% if component == name %} active{% endif %}">
          <a href="{{ component }}.html">{{ component | upper_first }}</a>
        </li>
      {% endfor %}
      </ul>
    </nav>
    <main class="main">
      {{ body | safe }}
    </main>
  </div>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_extract::{ParsedScriptDoc, ParsedStyleDoc, StyleKind, StyleParameter};

    fn entry_with_mixin() -> ComponentEntry {
        let mut entry = ComponentEntry::new("<p>A button.</p>".to_string());
        entry.mixins.push(ParsedStyleDoc {
            group: vec!["button".to_string()],
            kind: StyleKind::Mixin,
            name: "primary".to_string(),
            description: Some("Primary styling.".to_string()),
            parameters: vec![
                StyleParameter {
                    name: "size".to_string(),
                    description: None,
                },
                StyleParameter {
                    name: "color".to_string(),
                    description: None,
                },
            ],
        });
        entry
    }

    #[test]
    fn renders_component_body() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_component("button", &entry_with_mixin())
            .unwrap();

        assert!(html.contains("<h1>Button</h1>"));
        assert!(html.contains("<p>A button.</p>"));
        assert!(html.contains("@mixin primary($size, $color) { }"));
    }

    #[test]
    fn empty_lists_render_no_sections() {
        let engine = TemplateEngine::new();
        let entry = ComponentEntry::new(String::new());

        let html = engine.render_component("badge", &entry).unwrap();

        assert!(!html.contains("Sass Variables"));
        assert!(!html.contains("Sass Mixins"));
        assert!(!html.contains("JavaScript"));
    }

    #[test]
    fn layout_links_every_component_and_marks_active() {
        let engine = TemplateEngine::new();
        let components = vec!["button".to_string(), "modal".to_string()];

        let html = engine
            .render_layout("Style Guide", "modal", "<article/>", &components)
            .unwrap();

        assert!(html.contains("href=\"button.html\""));
        assert!(html.contains("href=\"modal.html\""));
        assert!(html.contains("<title>Modal - Style Guide</title>"));
        assert!(html.contains("nav-item active"));
    }

    #[test]
    fn renders_script_doclets() {
        let engine = TemplateEngine::new();
        let mut entry = ComponentEntry::new(String::new());
        entry.scripts.push(ParsedScriptDoc {
            kind: "function".to_string(),
            name: "toggle".to_string(),
            description: Some("Toggles the thing.".to_string()),
            tags: vec![],
        });

        let html = engine.render_component("button", &entry).unwrap();

        assert!(html.contains("function toggle"));
        assert!(html.contains("Toggles the thing."));
    }

    #[test]
    fn mixin_signature_without_parameters() {
        let engine = TemplateEngine::new();
        let mut entry = ComponentEntry::new(String::new());
        entry.mixins.push(ParsedStyleDoc {
            group: vec!["x".to_string()],
            kind: StyleKind::Mixin,
            name: "reset".to_string(),
            description: None,
            parameters: vec![],
        });

        let html = engine.render_component("x", &entry).unwrap();

        assert!(html.contains("@mixin reset { }"));
    }
}
