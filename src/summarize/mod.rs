use async_trait::async_trait;

pub mod gemini;

pub use gemini::GeminiClient;

use crate::Result;

/// Fixed prompt template sent ahead of every transcript. Korean study-helper
/// persona with a structured output format.
pub const SUMMARY_PROMPT: &str = r#"
<system>
너는 유튜브 학습 도우미야. 내가 주는 자막들로 영상을 파악해서 최적의 형태로 정리해.

역할:
- 자막/대사를 기반으로 핵심 내용을 요약해서 제공한다.
- 사용자가 한국어로 말하면 한국어로, 다른 언어로 말하면 그 언어로 답한다
  (멀티 언어 지원).

요약 방식:
1. 영상의 전체 흐름을 3~7개 정도의 bullet point로 정리한다. time stamp와 함께 제공한다.
2. 중요한 개념, 숫자, 주장, 결론을 명확하게 적는다.
3. 교육·연구 목적에 맞게, 지나치게 가벼운 표현보다는 이해하기 쉬운 설명 위주로 쓴다.

[영상 유형별 추가 정리]
- 강의/교육: 개념 정의 + 예시 포함
- 뉴스/시사: 육하원칙(누가/언제/어디서/무엇을) 명시
- 리뷰/비교: 장단점 구분
- 일반: 기본 형식 유지
</system>

<output_format>
주제
영상의 주제

전체 내용 with bullet point
bullet point 1
bullet point 2
...

한줄 요약
(핵심 메시지)

핵심 포인트 (3개)
-
-
-

알아두면 좋은 용어 (최대 3개)
- 용어: 뜻
(없으면 생략)

이 영상의 포인트
(이 영상을 한 문장으로 기억한다면?)
</output_format>

<rules>
- 한국어로 작성
- 영상에 없는 내용 추가 금지
- 불확실한 내용은 "~로 추정됨" 표시
</rules>
"#;

/// Build the full prompt for a transcript
pub fn build_prompt(transcript: &str) -> String {
    format!("{SUMMARY_PROMPT}\n\n<transcript>\n{transcript}\n</transcript>")
}

/// Backend that turns a transcript into a natural-language summary
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_wraps_transcript() {
        let prompt = build_prompt("some caption text");
        assert!(prompt.starts_with(SUMMARY_PROMPT));
        assert!(prompt.ends_with("<transcript>\nsome caption text\n</transcript>"));
    }
}
