//! 뷰 렌더링.
//!
//! 컨트롤러 상태 → 선언적 뷰 트리 변환. 프레젠테이션 레이어는
//! 트리를 HTML로 그리거나([`Node::to_html`]) 터미널 텍스트로 출력한다([`render_terminal`]).

use imgtext_core::models::ui::CopyTarget;

use crate::controller::{Phase, UploadController};
use crate::messages::Toast;

/// 뷰 노드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// 요소
    Element(Element),
    /// 텍스트
    Text(String),
}

/// 뷰 트리 (루트 노드)
pub type ViewTree = Node;

/// 요소 노드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// 태그 이름
    pub tag: &'static str,
    /// 요소 id
    pub id: Option<&'static str>,
    /// CSS 클래스
    pub classes: Vec<&'static str>,
    /// 속성 (이름, 값)
    pub attrs: Vec<(&'static str, String)>,
    /// 자식 노드
    pub children: Vec<Node>,
}

impl Element {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn id(mut self, id: &'static str) -> Self {
        self.id = Some(id);
        self
    }

    fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    fn node(self) -> Node {
        Node::Element(self)
    }

    /// 속성 값 조회
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// 클래스 보유 여부
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

impl Node {
    /// id로 요소 검색 (깊이 우선)
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        match self {
            Node::Element(el) => {
                if el.id == Some(id) {
                    return Some(el);
                }
                el.children.iter().find_map(|c| c.find_by_id(id))
            }
            Node::Text(_) => None,
        }
    }

    /// 하위 텍스트 전체 연결
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    /// HTML 직렬화 (텍스트/속성 이스케이프)
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                if let Some(id) = el.id {
                    out.push_str(&format!(" id=\"{id}\""));
                }
                if !el.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", el.classes.join(" ")));
                }
                for (name, value) in &el.attrs {
                    out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
                }
                out.push('>');
                if el.tag == "img" {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str(&format!("</{}>", el.tag));
            }
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 허용 형식 안내 문구
pub const TYPE_ERROR_TEXT: &str = "Only JPEG and PNG images are allowed";

/// 크기 초과 안내 문구 (1 MiB 미만은 KB, 1 KiB 미만은 bytes)
pub fn size_error_text(max_bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    let limit = if max_bytes >= MIB {
        format_unit(max_bytes, MIB, "MB")
    } else if max_bytes >= KIB {
        format_unit(max_bytes, KIB, "KB")
    } else {
        format!("{max_bytes} bytes")
    };
    format!("File must not exceed {limit}")
}

/// 나누어떨어지면 정수, 아니면 소수 첫째 자리까지
fn format_unit(bytes: u64, unit: u64, suffix: &str) -> String {
    if bytes % unit == 0 {
        format!("{} {suffix}", bytes / unit)
    } else {
        format!("{:.1} {suffix}", bytes as f64 / unit as f64)
    }
}

/// 컨트롤러 상태 + 토스트 → 뷰 트리
pub fn render(controller: &UploadController, toast: Option<&Toast>) -> ViewTree {
    let flags = controller.ui_flags();
    let upload = controller.upload_state();
    let result = controller.result_state();

    let mut upload_section = Element::new("section")
        .id("upload")
        .child(
            Element::new("p")
                .id("file-name")
                .text(upload.file_name.clone())
                .node(),
        );
    if upload.validation_errors.type_invalid {
        upload_section = upload_section.child(
            Element::new("p")
                .id("error-type")
                .class("error")
                .text(TYPE_ERROR_TEXT)
                .node(),
        );
    }
    if upload.validation_errors.size_exceeded {
        upload_section = upload_section.child(
            Element::new("p")
                .id("error-size")
                .class("error")
                .text(size_error_text(controller.config().upload.max_bytes))
                .node(),
        );
    }

    let mut thumb_container = Element::new("div").id("img-result");
    if !flags.show_thumbnail {
        thumb_container = thumb_container.class("hidden");
    }
    if let Some(thumb) = controller.thumbnail() {
        thumb_container = thumb_container.child(
            Element::new("img")
                .attr("src", thumb.data_url.clone())
                .attr("width", thumb.width.to_string())
                .attr("height", thumb.height.to_string())
                .node(),
        );
    }
    upload_section = upload_section.child(thumb_container.node());

    let mut send_button = Element::new("button").id("send").text("Send");
    if flags.send_disabled {
        send_button = send_button.attr("disabled", "disabled");
    }
    upload_section = upload_section.child(send_button.node());
    if flags.loading {
        upload_section =
            upload_section.child(Element::new("div").id("loading").class("spinner").node());
    }

    let mut result_section = Element::new("section").id("result");
    if !flags.show_result {
        result_section = result_section.class("hidden");
    }
    let mut text_area = Element::new("div").id("result-show-text");
    if !result.plain_text.is_empty() {
        text_area = text_area.child(Element::new("p").text(result.plain_text.clone()).node());
    }
    let mut pre = Element::new("pre").text(result.raw_json.clone());
    if controller.phase() == Phase::Failed {
        pre = pre.attr("style", "overflow-x: scroll;");
    }
    result_section = result_section
        .child(copy_button(CopyTarget::ResultText, flags.copy_text_icon.icon_name()))
        .child(text_area.node())
        .child(copy_button(CopyTarget::ResultJson, flags.copy_json_icon.icon_name()))
        .child(
            Element::new("div")
                .id("result-show-json")
                .child(pre.node())
                .node(),
        );

    let mut root = Element::new("main")
        .child(upload_section.node())
        .child(result_section.node());
    if let Some(toast) = toast {
        root = root.child(render_toast(toast));
    }
    root.node()
}

fn copy_button(target: CopyTarget, icon: &'static str) -> Node {
    Element::new("button")
        .id(target.id())
        .class("copy")
        .attr("data-icon", icon)
        .text(icon)
        .node()
}

fn render_toast(toast: &Toast) -> Node {
    let mut banner = Element::new("div")
        .id("show-message")
        .class(toast.severity.css_class());
    if toast.hidden {
        banner = banner.class("hidden");
    }
    let mut text = Element::new("div").id("show-message-text");
    if !toast.text.is_empty() {
        text = text.child(Element::new("p").text(toast.text.clone()).node());
    }
    banner.child(text.node()).node()
}

/// 터미널 출력용 텍스트 렌더링 (숨김 요소 생략)
pub fn render_terminal(view: &ViewTree) -> String {
    let mut lines = Vec::new();
    collect_terminal_lines(view, &mut lines);
    lines.join("\n")
}

fn collect_terminal_lines(node: &Node, lines: &mut Vec<String>) {
    let Node::Element(el) = node else {
        return;
    };
    if el.has_class("hidden") {
        return;
    }

    match (el.tag, el.id) {
        ("p", Some("file-name")) if !node.text_content().is_empty() => {
            lines.push(format!("파일: {}", node.text_content()));
        }
        ("p", Some(id)) if id.starts_with("error-") => {
            lines.push(format!("✗ {}", node.text_content()));
        }
        ("img", _) => {
            let w = el.attr_value("width").unwrap_or("?");
            let h = el.attr_value("height").unwrap_or("?");
            let len = el.attr_value("src").map(str::len).unwrap_or(0);
            lines.push(format!("썸네일: {w}x{h} (data URL {len} bytes)"));
        }
        ("div", Some("loading")) => lines.push("전송 중...".to_string()),
        ("div", Some("result-show-text")) => {
            lines.push("── 텍스트 ──".to_string());
            lines.push(node.text_content());
        }
        ("div", Some("result-show-json")) => {
            lines.push("── JSON ──".to_string());
            lines.push(node.text_content());
        }
        ("div", Some("show-message")) => {
            lines.push(format!("[{}] {}", el.classes.join(" "), node.text_content()));
        }
        _ => {
            for child in &el.children {
                collect_terminal_lines(child, lines);
            }
        }
    }
}
