//! Template constants for every generated file.
//!
//! Interpolation is plain `{{variable}}` substitution; loops and conditional
//! fragments are resolved by the renderers before the template is applied, so
//! rendering a template with a fixed context is byte-stable.

/// Python model source.
///
/// `table_line`, `inherit_line` and `rec_name_line` are complete indented
/// lines (with trailing newline) or empty; the block variables are fully
/// formatted multi-line fragments.
pub const MODEL_PY: &str = r#"# -*- coding: utf-8 -*-
"""{{description}} model."""

from odoo import api, fields, models


class {{class_name}}(models.Model):
    """{{description}}."""

    _name = '{{model_name}}'
{{table_line}}    _description = '{{description}}'
{{inherit_line}}    _order = '{{order}}'
{{rec_name_line}}
{{field_block}}{{compute_block}}{{constraint_block}}    def name_get(self):
        result = []
        for record in self:
            name = {{display_expression}}
            result.append((record.id, name))
        return result

    @api.model
    def create(self, vals):
        return super().create(vals)

    def write(self, vals):
        return super().write(vals)

    def unlink(self):
        return super().unlink()
{{active_block}}"#;

/// Envelope for view XML documents; `body` carries the rendered view records.
pub const DATA_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<odoo>
    <data>
{{body}}    </data>
</odoo>
"#;

/// Envelope for demo XML documents (`noupdate` so reinstalls keep edits).
pub const DEMO_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<odoo>
    <data noupdate="1">
{{body}}    </data>
</odoo>
"#;

/// Addon manifest.
pub const MANIFEST_PY: &str = r#"# -*- coding: utf-8 -*-
{
    'name': '{{name}}',
    'version': '{{version}}',
    'category': '{{category}}',
    'summary': '{{summary}}',
    'description': """
{{description}}

Models:
{{model_lines}}    """,
    'author': '{{author}}',
    'website': '{{website}}',
    'depends': {{depends}},
    'data': [
{{data_files}}    ],
    'demo': [
{{demo_files}}    ],
    'installable': True,
    'auto_install': False,
    'application': {{application}},
    'sequence': {{sequence}},
    'license': '{{license}}',
}
"#;

/// Top-level `__init__.py`.
pub const MODULE_INIT_PY: &str = r#"# -*- coding: utf-8 -*-
"""{{name}}."""

from . import models
"#;

/// `models/__init__.py`; `imports` is one `from . import x` line per model.
pub const MODELS_INIT_PY: &str = r#"# -*- coding: utf-8 -*-
"""Models for {{name}}."""

{{imports}}"#;

/// Empty package marker for controllers/wizards/reports.
pub const PACKAGE_INIT_PY: &str = "# -*- coding: utf-8 -*-\n";

/// Module README; `model_docs` is the per-model documentation block.
pub const README_MD: &str = r#"# {{name}}

{{summary}}

## Description

{{description}}

## Models

{{model_docs}}
## Installation

1. Copy the `{{module_dir}}` directory into your Odoo addons path.
2. Restart the Odoo server.
3. Update the apps list (Apps > Update Apps List).
4. Search for "{{name}}" and install it.

## License

{{license}}
"#;

/// App-store description page.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{name}}</title>
    <style>
        body { font-family: 'Lucida Grande', sans-serif; margin: 0; padding: 20px; }
        .oe_container { max-width: 1200px; margin: 0 auto; }
        .oe_span12 { flex: 1; padding: 15px; }
        .oe_slogan { font-size: 2.5em; color: #875A7B; margin-bottom: 0.5em; }
        h2 { color: #333; }
    </style>
</head>
<body>
    <section class="oe_container">
        <div class="oe_row oe_spaced">
            <div class="oe_span12">
                <h2 class="oe_slogan">{{name}}</h2>
                <p class="oe_mt32">
                    {{description}}
                </p>
            </div>
        </div>
    </section>
    <section class="oe_container">
        <div class="oe_row">
            <div class="oe_span12">
                <h2>Installation</h2>
                <p>
                    Install this addon like any standard Odoo module.
                </p>
            </div>
        </div>
    </section>
</body>
</html>
"#;

/// Default module icon.
pub const ICON_SVG: &str = r##"<svg width="128" height="128" viewBox="0 0 128 128" xmlns="http://www.w3.org/2000/svg">
  <rect width="128" height="128" fill="#875A7B"/>
  <text x="64" y="74" font-family="Arial" font-size="48" fill="white" text-anchor="middle">{{initial}}</text>
</svg>
"##;

/// Placeholder stylesheet.
pub const MODULE_CSS: &str = r#"/* Custom styles for this module */

.o_module_custom {
}

.o_form_view .o_module_custom .oe_title h1 {
    color: #875A7B;
}

.o_kanban_view .o_module_custom {
    border-left: 3px solid #875A7B;
}
"#;

/// Placeholder script.
pub const MODULE_JS: &str = r#"/** @odoo-module **/

// Custom client code for this module.
"#;
