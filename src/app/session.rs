use crate::core::controller::ContactFormController;
use crate::core::{ContactField, EmailGateway, Notifier, SubmitOutcome};
use crate::utils::error::{ContactError, Result};
use std::io::{BufRead, Write};

/// 以文字提示收集欄位並送出的聯絡流程
///
/// 驗證失敗時只重新詢問出錯的欄位；投遞失敗時詢問是否重試，
/// 草稿保留不變。`interactive` 為 false 時第一個錯誤直接回傳。
pub struct ContactSession<'a, G: EmailGateway, N: Notifier, R: BufRead, W: Write> {
    controller: &'a ContactFormController<G, N>,
    input: R,
    output: W,
    interactive: bool,
}

impl<'a, G: EmailGateway, N: Notifier, R: BufRead, W: Write> ContactSession<'a, G, N, R, W> {
    pub fn new(controller: &'a ContactFormController<G, N>, input: R, output: W) -> Self {
        Self {
            controller,
            input,
            output,
            interactive: true,
        }
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub async fn run(&mut self) -> Result<SubmitOutcome> {
        if self.interactive {
            let draft = self.controller.draft();
            for field in ContactField::ALL {
                if draft.get(field).trim().is_empty() {
                    self.ask(field)?;
                }
            }
        }

        loop {
            match self.controller.submit().await {
                Ok(outcome) => return Ok(outcome),
                Err(ContactError::ValidationError(errors)) => {
                    for error in errors.fields() {
                        writeln!(self.output, "⚠️  {}", error)?;
                    }

                    if !self.interactive {
                        return Err(ContactError::ValidationError(errors));
                    }

                    for error in errors.fields() {
                        self.ask(error.field)?;
                    }
                }
                Err(e @ ContactError::DeliveryError { .. }) => {
                    if !self.interactive || !self.confirm("Retry? [y/N] ")? {
                        return Err(e);
                    }
                    tracing::info!("🔁 Retrying with the preserved draft");
                }
                Err(e) => return Err(e),
            }
        }
    }

    // 同步讀取會阻塞執行緒；CLI 一次只跑一個流程，郵件請求不會與輸入同時進行
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ContactError::IoError(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before the contact form was complete",
            )));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask(&mut self, field: ContactField) -> Result<()> {
        write!(self.output, "{}: ", field.label())?;
        self.output.flush()?;
        let value = self.read_line()?;
        self.controller.update_field(field, value);
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let answer = self.read_line()?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}
