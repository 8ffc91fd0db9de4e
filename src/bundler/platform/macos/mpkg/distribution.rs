//! Distribution descriptor model and rendering.
//!
//! The descriptor drives Installer.app: it lists one choice per component
//! package and decides at install time, through the embedded script, whether
//! the standard or the Mac OS X 10.4 variant of each daemon is offered.

use super::template::DISTRIBUTION_TEMPLATE;
use crate::bundler::{
    Settings,
    error::{Error, Result},
    platform::macos::pkg::{ComponentPackage, ModuleComponents},
    utils::fs,
};
use handlebars::Handlebars;
use serde::Serialize;

/// Script predicate that is true when installing onto Mac OS X 10.4.
const TIGER_CHECK: &str = "checkIfTiger()";

/// Script function that rejects machines without a Hyper-V controller.
const INSTALLATION_CHECK: &str = "installCheckScript()";

/// License file name inside `English.lproj`.
pub(crate) const LICENSE_FILE: &str = "License.txt";

/// An installer choice selecting one component package.
#[derive(Debug, Clone, Serialize)]
struct Choice {
    /// Choice id (the package name).
    id: String,
    /// Localizable strings key of the title.
    title: String,
    /// Localizable strings key of the description.
    description: String,
    /// Script expression deciding the initial selection.
    start_selected: String,
    /// Script expression deciding visibility.
    visible: String,
    /// Identifier of the package installed by this choice.
    package_identifier: String,
}

/// A top-level package reference with its install size hint.
#[derive(Debug, Clone, Serialize)]
struct PackageRef {
    /// Package identifier.
    id: String,
    /// Authorization required to install.
    auth: String,
    /// Installed size in kilobytes (1000 bytes).
    install_kbytes: u64,
    /// Package location relative to the mpkg bundle.
    location: String,
}

/// In-memory `installer-gui-script` document.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    title: String,
    license_file: String,
    script: String,
    installation_check: String,
    outline: Vec<String>,
    choices: Vec<Choice>,
    package_refs: Vec<PackageRef>,
}

/// Converts a payload byte count to the `installKBytes` hint.
///
/// Divides by 1000 and rounds half to even. Never returns 0: Installer.app
/// treats a zero size as unknown.
pub fn install_kbytes(bytes: u64) -> u64 {
    let kbytes = (bytes as f64 / 1000.0).round_ties_even() as u64;
    kbytes.max(1)
}

impl Distribution {
    /// Builds the descriptor for the given modules.
    ///
    /// Choices and package references follow module order, each standard
    /// package directly followed by its legacy variant. Install sizes are
    /// measured from the payload directories.
    pub async fn build(
        settings: &Settings,
        components: &[ModuleComponents],
        script: String,
    ) -> Result<Self> {
        let mut distribution = Self {
            title: format!("{}_title", settings.package().mpkg_name),
            license_file: LICENSE_FILE.to_string(),
            script,
            installation_check: INSTALLATION_CHECK.to_string(),
            outline: Vec::new(),
            choices: Vec::new(),
            package_refs: Vec::new(),
        };

        for module in components {
            distribution.add_package(&module.standard, false).await?;
            if let Some(legacy) = &module.legacy {
                distribution.add_package(legacy, true).await?;
            }
        }

        Ok(distribution)
    }

    async fn add_package(&mut self, package: &ComponentPackage, legacy: bool) -> Result<()> {
        let condition = if legacy {
            TIGER_CHECK.to_string()
        } else {
            format!("!{TIGER_CHECK}")
        };

        self.outline.push(package.name.clone());
        self.choices.push(Choice {
            id: package.name.clone(),
            title: format!("{}_title", package.name),
            description: format!("{}_description", package.name),
            start_selected: condition.clone(),
            visible: condition,
            package_identifier: package.identifier.clone(),
        });

        let bytes = fs::directory_size(&package.payload_dir).await?;
        log::debug!(
            "{} payload is {} bytes",
            package.identifier,
            bytes
        );
        self.package_refs.push(PackageRef {
            id: package.identifier.clone(),
            auth: "root".to_string(),
            install_kbytes: install_kbytes(bytes),
            location: format!("file:./Contents/Packages/{}", package.file_name()),
        });

        Ok(())
    }

    /// Renders the descriptor as an XML document with declaration.
    pub fn render(&self) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(escape_xml);
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string("distribution.dist", DISTRIBUTION_TEMPLATE)
            .map_err(|e| {
                Error::GenericError(format!("failed to register distribution template: {}", e))
            })?;

        handlebars
            .render("distribution.dist", self)
            .map_err(|e| Error::GenericError(format!("failed to render distribution: {}", e)))
    }
}

/// Escapes text for use in XML character data and double-quoted attributes.
fn escape_xml(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{DaemonModule, PackageSettings, SettingsBuilder};
    use crate::bundler::platform::macos::pkg::PackageFormat;
    use std::path::Path;

    fn package(root: &Path, name: &str, payload_bytes: usize, format: PackageFormat) -> ComponentPackage {
        let payload_dir = root.join(name);
        std::fs::create_dir_all(payload_dir.join("Library/LaunchDaemons")).unwrap();
        std::fs::write(
            payload_dir.join("Library/LaunchDaemons/daemon.plist"),
            vec![b'x'; payload_bytes],
        )
        .unwrap();
        ComponentPackage {
            name: name.to_string(),
            identifier: format!("fish.goldfish64.pkg.MacHyperVSupport.{name}"),
            path: root.join(format!("{name}.pkg")),
            payload_dir,
            format,
        }
    }

    fn settings(root: &Path) -> Settings {
        SettingsBuilder::new()
            .build_directory(root)
            .project_directory(root)
            .package_settings(PackageSettings {
                version: "1.0".into(),
                ..Default::default()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn kbytes_round_half_to_even_and_never_zero() {
        assert_eq!(install_kbytes(0), 1);
        assert_eq!(install_kbytes(499), 1);
        assert_eq!(install_kbytes(1499), 1);
        assert_eq!(install_kbytes(1500), 2);
        assert_eq!(install_kbytes(2500), 2);
        assert_eq!(install_kbytes(2501), 3);
        assert_eq!(install_kbytes(48_213), 48);
    }

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(
            escape_xml(r#"a < b && c > "d""#),
            "a &lt; b &amp;&amp; c &gt; &quot;d&quot;"
        );
        assert_eq!(escape_xml("it's"), "it's");
    }

    #[tokio::test]
    async fn renders_choices_and_package_refs() {
        let temp = tempfile::tempdir().unwrap();
        let settings = settings(temp.path());
        let modules = DaemonModule::standard_set();
        let components = vec![
            ModuleComponents {
                module: modules[0].clone(),
                standard: package(temp.path(), "FileCopyTool", 2600, PackageFormat::Flat),
                legacy: Some(package(
                    temp.path(),
                    "FileCopyToolTiger",
                    1200,
                    PackageFormat::Bundle,
                )),
            },
            ModuleComponents {
                module: modules[1].clone(),
                standard: package(temp.path(), "ShutdownTool", 5000, PackageFormat::Flat),
                legacy: None,
            },
        ];
        let script = "function checkIfTiger() { return a < b && c; }".to_string();

        let distribution = Distribution::build(&settings, &components, script)
            .await
            .unwrap();
        let xml = distribution.render().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));

        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "installer-gui-script");
        assert_eq!(root.attribute("minSpecVersion"), Some("1"));

        let child_text = |tag: &str| {
            root.children()
                .find(|n| n.has_tag_name(tag))
                .and_then(|n| n.text())
                .map(str::to_string)
        };
        assert_eq!(child_text("title").as_deref(), Some("MacHyperVSupportTools_title"));
        assert_eq!(
            child_text("script").as_deref(),
            Some("function checkIfTiger() { return a < b && c; }")
        );

        let outline: Vec<_> = root
            .children()
            .find(|n| n.has_tag_name("choices-outline"))
            .unwrap()
            .children()
            .filter(|n| n.has_tag_name("line"))
            .filter_map(|n| n.attribute("choice"))
            .collect();
        assert_eq!(outline, ["FileCopyTool", "FileCopyToolTiger", "ShutdownTool"]);

        let choices: Vec<_> = root.children().filter(|n| n.has_tag_name("choice")).collect();
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[0].attribute("visible"), Some("!checkIfTiger()"));
        assert_eq!(choices[1].attribute("visible"), Some("checkIfTiger()"));
        assert_eq!(choices[1].attribute("start_selected"), Some("checkIfTiger()"));
        assert_eq!(choices[2].attribute("title"), Some("ShutdownTool_title"));
        assert_eq!(
            choices[2]
                .children()
                .find(|n| n.has_tag_name("pkg-ref"))
                .and_then(|n| n.attribute("id")),
            Some("fish.goldfish64.pkg.MacHyperVSupport.ShutdownTool")
        );

        let refs: Vec<_> = root.children().filter(|n| n.has_tag_name("pkg-ref")).collect();
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].attribute("installKBytes"), Some("3"));
        assert_eq!(refs[1].attribute("installKBytes"), Some("1"));
        assert_eq!(refs[2].attribute("installKBytes"), Some("5"));
        assert_eq!(refs[1].attribute("auth"), Some("root"));
        assert_eq!(
            refs[1].text(),
            Some("file:./Contents/Packages/FileCopyToolTiger.pkg")
        );
    }
}
