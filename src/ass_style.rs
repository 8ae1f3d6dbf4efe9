use log::{debug, warn};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::app_config::{STYLE_FILE, resolve_setting_dir};
use crate::color;
use crate::errors::{ColorError, ConfigError};
use crate::file_utils::FileManager;
use crate::language_utils::LanguageTable;

// @module: ASS header composition

// @const: Events block, independent of configuration
pub const EVENTS_HEADER: &str =
    "[Events]\nFormat: Layer, Start, End, Style, Actor, MarginL, MarginR, MarginV, Effect, Text\n\n";

const HEAD_KEY: &str = "Head";
const MSG_KEY: &str = "msg";
const SCRIPT_INFO_KEY: &str = "ScriptInfo";
const STYLE_KEY: &str = "style";

const TITLE_KEY: &str = "Title";
const RES_X_KEY: &str = "PlayResX";
const RES_Y_KEY: &str = "PlayResY";
const FONT_NAME_KEY: &str = "Fontname";
const FONT_SIZE_KEY: &str = "Fontsize";

/// A single scalar value from the style table
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Number exactly as it was written in the JSON (`2.0` stays `2.0`)
    Number(serde_json::Number),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl FieldValue {
    // @converts: JSON scalar, None for null/array/object
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            _ => None,
        }
    }

    /// Value as a non-negative integer, accepting numeric strings
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Number(n) => match n.as_u64() {
                Some(u) => u32::try_from(u).ok(),
                None => n.as_f64().and_then(|f| Self::Float(f).as_u32()),
            },
            Self::Integer(i) => u32::try_from(*i).ok(),
            Self::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX) => {
                Some(*f as u32)
            }
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Value as a number, accepting numeric strings
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            // ASS spells booleans as yes/no (ScaledBorderAndShadow, ...)
            Self::Bool(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered name/value pairs. Order is the order of the source JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldList {
    entries: Vec<(String, FieldValue)>,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Overwrite in place, or append when the name is new
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Comment lines printed under the Script Info heading
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Line(String),
    Lines(Vec<String>),
}

impl Message {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Line(line) => vec![line.as_str()],
            Self::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// `[Script Info]` block
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptInfo {
    pub head: String,
    pub msg: Message,
    pub fields: FieldList,
}

impl ScriptInfo {
    fn render(&self, out: &mut String) {
        out.push_str(&self.head);
        out.push('\n');
        for line in self.msg.lines() {
            out.push_str(line);
            out.push('\n');
        }
        for (key, value) in self.fields.iter() {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push('\n');
    }
}

/// `[V4+ Styles]` block. Field names and values are zipped by position.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleFormat {
    pub head: String,
    pub fields: FieldList,
}

impl StyleFormat {
    /// `Format: ` line, names joined by ", "
    pub fn format_line(&self) -> String {
        let names: Vec<&str> = self.fields.keys().collect();
        format!("Format: {}", names.join(", "))
    }

    /// `Style: ` line, values joined by ","
    pub fn style_line(&self) -> String {
        let values: Vec<String> = self.fields.iter().map(|(_, v)| v.to_string()).collect();
        format!("Style: {}", values.join(","))
    }

    fn render(&self, out: &mut String) {
        out.push_str(&self.head);
        out.push('\n');
        out.push_str(&self.format_line());
        out.push('\n');
        out.push_str(&self.style_line());
        out.push_str("\n\n");
    }
}

/// Parsed `ass_styles.json`
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    pub script_info: ScriptInfo,
    pub style: StyleFormat,
}

impl StyleTable {
    /// Load `ass_styles.json` from the setting directory
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let value: Value = FileManager::load_json(dir, STYLE_FILE)?;
        let table = Self::from_json(value, &dir.join(STYLE_FILE).display().to_string())?;
        debug!(
            "Loaded {} script info keys and {} style fields from {:?}",
            table.script_info.fields.len(),
            table.style.fields.len(),
            dir
        );
        Ok(table)
    }

    /// Build a table from parsed JSON, checking the entries the header needs.
    ///
    /// `source` names where the JSON came from and only shows up in error
    /// messages.
    pub fn from_json(value: Value, source: &str) -> Result<Self, ConfigError> {
        let layout_error = |message: String| ConfigError::InvalidLayout {
            file: source.to_string(),
            message,
        };

        let Value::Object(mut root) = value else {
            return Err(layout_error("top level must be a JSON object".to_string()));
        };

        let info = take_object(&mut root, SCRIPT_INFO_KEY).map_err(layout_error)?;
        let style = take_object(&mut root, STYLE_KEY).map_err(layout_error)?;
        for extra in root.keys() {
            warn!("Ignoring unknown top-level key \"{}\" in {}", extra, source);
        }

        let script_info = parse_script_info(info).map_err(layout_error)?;
        let style = parse_style(style).map_err(layout_error)?;

        Ok(Self { script_info, style })
    }
}

fn take_object(root: &mut Map<String, Value>, key: &str) -> Result<Map<String, Value>, String> {
    match root.shift_remove(key) {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(format!("\"{}\" must be an object", key)),
        None => Err(format!("missing \"{}\" section", key)),
    }
}

fn take_head(section: &mut Map<String, Value>, name: &str) -> Result<String, String> {
    match section.shift_remove(HEAD_KEY) {
        Some(Value::String(head)) => Ok(head),
        Some(_) => Err(format!("{}.{} must be a string", name, HEAD_KEY)),
        None => Err(format!("missing {}.{}", name, HEAD_KEY)),
    }
}

fn collect_fields(section: Map<String, Value>, name: &str) -> Result<FieldList, String> {
    let mut fields = FieldList::new();
    for (key, value) in section {
        let field = FieldValue::from_json(&value)
            .ok_or_else(|| format!("{}.{} must be a string, number or boolean", name, key))?;
        fields.set(&key, field);
    }
    Ok(fields)
}

fn parse_script_info(mut section: Map<String, Value>) -> Result<ScriptInfo, String> {
    let head = take_head(&mut section, SCRIPT_INFO_KEY)?;

    let msg = match section.shift_remove(MSG_KEY) {
        Some(Value::String(line)) => Message::Line(line),
        Some(Value::Array(items)) => {
            let lines = items
                .into_iter()
                .map(|item| match item {
                    Value::String(line) => Ok(line),
                    _ => Err(format!("{}.{} entries must be strings", SCRIPT_INFO_KEY, MSG_KEY)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Message::Lines(lines)
        }
        Some(_) => {
            return Err(format!(
                "{}.{} must be a string or a list of strings",
                SCRIPT_INFO_KEY, MSG_KEY
            ));
        }
        None => return Err(format!("missing {}.{}", SCRIPT_INFO_KEY, MSG_KEY)),
    };

    let fields = collect_fields(section, SCRIPT_INFO_KEY)?;

    if fields.get(TITLE_KEY).is_none() {
        return Err(format!("missing {}.{}", SCRIPT_INFO_KEY, TITLE_KEY));
    }
    for key in [RES_X_KEY, RES_Y_KEY] {
        match fields.get(key) {
            Some(value) if value.as_u32().is_some() => {}
            Some(value) => {
                return Err(format!(
                    "{}.{} must be a non-negative integer, got \"{}\"",
                    SCRIPT_INFO_KEY, key, value
                ));
            }
            None => return Err(format!("missing {}.{}", SCRIPT_INFO_KEY, key)),
        }
    }

    Ok(ScriptInfo { head, msg, fields })
}

fn parse_style(mut section: Map<String, Value>) -> Result<StyleFormat, String> {
    let head = take_head(&mut section, STYLE_KEY)?;
    let fields = collect_fields(section, STYLE_KEY)?;

    if fields.get(FONT_NAME_KEY).is_none() {
        return Err(format!("missing {}.{}", STYLE_KEY, FONT_NAME_KEY));
    }
    match fields.get(FONT_SIZE_KEY) {
        Some(value) if value.as_f64().is_some() => {}
        Some(value) => {
            return Err(format!(
                "{}.{} must be a number, got \"{}\"",
                STYLE_KEY, FONT_SIZE_KEY, value
            ));
        }
        None => return Err(format!("missing {}.{}", STYLE_KEY, FONT_SIZE_KEY)),
    }

    Ok(StyleFormat { head, fields })
}

/// Owns the language and style tables of one conversion and renders the
/// ASS header from them.
///
/// Setters change what every later `render_header` call produces, so give
/// each conversion its own composer.
#[derive(Debug, Clone)]
pub struct StyleComposer {
    languages: LanguageTable,
    styles: StyleTable,
    setting_dir: Option<PathBuf>,
}

impl StyleComposer {
    /// Load both setting files. `None` resolves the directory through
    /// [`resolve_setting_dir`].
    pub fn new(setting_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let (dir, source) = resolve_setting_dir(setting_dir);
        debug!("Loading settings from {:?} ({})", dir, source);

        let languages = LanguageTable::load(&dir)?;
        let styles = StyleTable::load(&dir)?;

        Ok(Self {
            languages,
            styles,
            setting_dir: Some(dir),
        })
    }

    /// Build from tables already in memory
    pub fn from_tables(languages: LanguageTable, styles: StyleTable) -> Self {
        Self {
            languages,
            styles,
            setting_dir: None,
        }
    }

    /// Directory the tables were loaded from, if any
    pub fn setting_dir(&self) -> Option<&Path> {
        self.setting_dir.as_deref()
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// SMI language code to ASS code. Unknown codes log a warning and get
    /// the `UNKNOWNCC` value.
    pub fn resolve_language_code(&self, code: &str) -> String {
        self.languages.resolve(code)
    }

    pub fn color_name_to_hex(&self, name: &str) -> Result<String, ColorError> {
        color::color_name_to_hex(name)
    }

    pub fn set_title(&mut self, title: &str) {
        self.styles.script_info.fields.set(TITLE_KEY, title);
    }

    pub fn get_title(&self) -> String {
        self.styles
            .script_info
            .fields
            .get(TITLE_KEY)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        let fields = &mut self.styles.script_info.fields;
        fields.set(RES_X_KEY, width);
        fields.set(RES_Y_KEY, height);
    }

    /// (PlayResX, PlayResY)
    pub fn get_resolution(&self) -> (u32, u32) {
        let fields = &self.styles.script_info.fields;
        let read = |key: &str| fields.get(key).and_then(FieldValue::as_u32).unwrap_or_default();
        (read(RES_X_KEY), read(RES_Y_KEY))
    }

    pub fn set_font_name(&mut self, name: &str) {
        self.styles.style.fields.set(FONT_NAME_KEY, name);
    }

    pub fn get_font_name(&self) -> String {
        self.styles
            .style
            .fields
            .get(FONT_NAME_KEY)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.styles.style.fields.set(FONT_SIZE_KEY, size);
    }

    pub fn get_font_size(&self) -> f64 {
        self.styles
            .style
            .fields
            .get(FONT_SIZE_KEY)
            .and_then(FieldValue::as_f64)
            .unwrap_or_default()
    }

    /// Script Info, Styles and the Events format line, each followed by a
    /// blank line.
    pub fn render_header(&self) -> String {
        let mut header = String::new();
        self.styles.script_info.render(&mut header);
        self.styles.style.render(&mut header);
        header.push_str(EVENTS_HEADER);
        header
    }
}
