//! Handlebars template for `distribution.dist`.

/// `installer-gui-script` document rendered from a [`Distribution`](super::Distribution).
///
/// Values are XML-escaped by the registry's escape function.
pub const DISTRIBUTION_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<installer-gui-script minSpecVersion="1">
	<title>{{title}}</title>
	<license file="{{license_file}}" />
	<options allow-external-scripts="no" customize="allow" rootVolumeOnly="true" />
	<script>{{script}}</script>
	<installation-check script="{{installation_check}}" />
	<choices-outline>
{{#each outline}}
		<line choice="{{this}}" />
{{/each}}
	</choices-outline>
{{#each choices}}
	<choice id="{{id}}" title="{{title}}" description="{{description}}" start_selected="{{start_selected}}" visible="{{visible}}">
		<pkg-ref id="{{package_identifier}}" />
	</choice>
{{/each}}
{{#each package_refs}}
	<pkg-ref id="{{id}}" auth="{{auth}}" installKBytes="{{install_kbytes}}">{{location}}</pkg-ref>
{{/each}}
</installer-gui-script>
"#;
