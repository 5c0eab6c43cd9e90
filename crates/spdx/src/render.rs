//! tag-value 스탠자 포맷터
//!
//! 템플릿 엔진 대신 `(태그, 값)` 쌍의 순서 있는 목록을 그대로 출력합니다.
//! 필드 생략 / 센티널 대체 규칙은 [`FieldList`]를 만들 때 결정되므로
//! 출력 전에 목록만으로 검증할 수 있습니다.

use std::fmt::{self, Write};

use crate::error::SpdxError;

/// 값이 없음을 나타내는 센티널
pub const NONE: &str = "NONE";

/// 값을 확인하지 않았음을 나타내는 센티널
pub const NOASSERTION: &str = "NOASSERTION";

/// 단일 `Tag: value` 행
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// 태그 이름
    pub tag: &'static str,
    /// 출력 값 (센티널 / `<text>` 래핑 적용 후)
    pub value: String,
}

/// 출력 순서가 고정된 필드 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    fields: Vec<Field>,
}

impl FieldList {
    /// 빈 목록을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 항상 출력되는 필드
    pub fn push(&mut self, tag: &'static str, value: impl Into<String>) {
        self.fields.push(Field {
            tag,
            value: value.into(),
        });
    }

    /// 값이 비어 있으면 생략되는 필드
    pub fn push_opt(&mut self, tag: &'static str, value: &str) {
        if !value.is_empty() {
            self.push(tag, value);
        }
    }

    /// 값이 비어 있으면 센티널로 대체되는 필드
    pub fn push_or(&mut self, tag: &'static str, value: &str, sentinel: &'static str) {
        if value.is_empty() {
            self.push(tag, sentinel);
        } else {
            self.push(tag, value);
        }
    }

    /// 여러 줄 텍스트 필드. 값은 `<text>`..`</text>`로 감쌉니다.
    pub fn push_text_or(&mut self, tag: &'static str, value: &str, sentinel: &'static str) {
        if value.is_empty() {
            self.push(tag, sentinel);
        } else {
            self.push(tag, format!("<text>{value}\n</text>"));
        }
    }

    /// 필드 목록
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// 태그에 해당하는 값들을 순서대로 반환합니다.
    pub fn values(&self, tag: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.tag == tag)
            .map(|f| f.value.as_str())
            .collect()
    }

    /// 태그가 목록에 있는지 확인합니다.
    pub fn contains(&self, tag: &str) -> bool {
        self.fields.iter().any(|f| f.tag == tag)
    }

    /// 스탠자를 출력합니다. 끝에 빈 줄 하나가 붙습니다.
    pub fn write_to(&self, out: &mut String) -> Result<(), SpdxError> {
        for field in &self.fields {
            writeln!(out, "{}: {}", field.tag, field.value)?;
        }
        out.push('\n');
        Ok(())
    }
}

/// 관계 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// 패키지가 파일 / 하위 패키지를 포함
    Contains,
    /// 패키지가 다른 패키지에 의존
    DependsOn,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => write!(f, "CONTAINS"),
            Self::DependsOn => write!(f, "DEPENDS_ON"),
        }
    }
}

/// `##### <comment>` 머리행과 빈 줄을 출력합니다.
pub fn write_header(out: &mut String, comment: &str) -> Result<(), SpdxError> {
    writeln!(out, "##### {comment}")?;
    out.push('\n');
    Ok(())
}

/// `Relationship: <from> <kind> <to>` 행과 빈 줄을 출력합니다.
pub fn write_relationship(
    out: &mut String,
    from: &str,
    kind: Relationship,
    to: &str,
) -> Result<(), SpdxError> {
    writeln!(out, "Relationship: {from} {kind} {to}")?;
    out.push('\n');
    Ok(())
}
