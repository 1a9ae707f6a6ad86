//! User-facing strings. The interface language is Turkish.

use crate::navigator::{NavError, Notice};
use crate::ui::view::{LineKind, ViewLine};

pub const APP_TITLE: &str = "E K O M C O D E";
pub const APP_SUBTITLE: &str = "Python Eğitim ve Otomasyon Platformu";

pub const MAIN_MENU: &str = "ANA MENÜ";
pub const GALLERY_MENU: &str = "KOD ÖRNEKLERİ";
pub const EXERCISES_MENU: &str = "ALIŞTIRMALAR";
pub const SETTINGS_MENU: &str = "AYARLAR";
pub const STATISTICS: &str = "İSTATİSTİKLER";
pub const PROGRESS_STATUS: &str = "İLERLEME DURUMU";
pub const RESET_TITLE: &str = "VERİLERİ SIFIRLA";
pub const RUNNING: &str = "KOD ÇALIŞTIRILIYOR";

pub const GALLERY_ENTRY: &str = "Kod Örneklerini İncele";
pub const EXERCISES_ENTRY: &str = "Alıştırma Yap";
pub const SETTINGS_ENTRY: &str = "Ayarlar";
pub const QUIT_ENTRY: &str = "Çıkış";
pub const BACK_TO_MAIN: &str = "Ana Menü";
pub const STATS_ENTRY: &str = "Kullanıcı İstatistikleri";
pub const RESET_ENTRY: &str = "Verileri Sıfırla";
pub const THEME_ENTRY: &str = "Temayı Değiştir";

pub const EXAMPLE_CODE: &str = "Örnek Kod:";
pub const ALREADY_DONE: &str = "✓ Bu ders tamamlandı.";
pub const SOLUTION: &str = "Çözüm:";
pub const SAMPLE_OUTPUT: &str = "Örnek çıktı:";
pub const MODULE_PROGRESS: &str = "Modül İlerlemeleri:";
pub const RESET_WARNING: &str = "Tüm verileriniz silinecek!";

pub const PROMPT_MAIN_CHOICE: &str = "Seçiminiz";
pub const PROMPT_LESSON_CHOICE: &str = "Ders seçin";
pub const PROMPT_RUN: &str = "Kodu çalıştırmak ister misiniz? (e/h): ";
pub const PROMPT_CONFIRM: &str = "Emin misiniz? (e/h): ";
pub const PROMPT_BACK_TO_MAIN: &str = "Ana menüye dönmek için Enter...";
pub const PROMPT_BACK_TO_MODULE: &str = "Ders listesine dönmek için Enter...";
pub const PROMPT_CONTINUE: &str = "Devam etmek için Enter...";
pub const PROMPT_SHOW_SOLUTION: &str = "Çözümü görmek için Enter...";

pub const FAREWELL: &str = "EkomCode'u kullandığınız için teşekkürler! 🚀";
pub const SHUTTING_DOWN: &str = "Program kapatılıyor...";
pub const THEME_CHANGED: &str = "Tema değiştirildi";

/// `Seçiminiz (1-5, 0=Ana menü): ` style prompt for a numbered list.
pub fn range_prompt(label: &str, count: usize) -> String {
    match count {
        0 => format!("{label} (0=geri): "),
        1 => format!("{label} (1, 0=geri): "),
        n => format!("{label} (1-{n}, 0=geri): "),
    }
}

pub fn progress_lines(completed: usize, total: usize, percent: f64, score: u32, start: &str) -> Vec<ViewLine> {
    vec![
        ViewLine::new(LineKind::Success, format!("Tamamlanan Dersler: {completed}/{total}")),
        ViewLine::new(LineKind::Accent, format!("İlerleme: {percent:.1}%")),
        ViewLine::new(LineKind::Warning, format!("Puan: {score}")),
        ViewLine::new(LineKind::Muted, format!("Başlangıç: {start}")),
    ]
}

/// Lines shown for a notice under the next screen.
pub fn notice_lines(notice: &Notice) -> Vec<ViewLine> {
    match notice {
        Notice::Input(NavError::NonNumericInput) => {
            vec![ViewLine::new(LineKind::Error, "Lütfen sayı girin!")]
        }
        Notice::Input(NavError::InvalidSelection) => {
            vec![ViewLine::new(LineKind::Error, "Geçersiz seçim! Tekrar deneyin.")]
        }
        Notice::Completed { reward } => vec![ViewLine::new(
            LineKind::Success,
            format!("✓ Ders tamamlandı! +{reward} puan"),
        )],
        Notice::RunOutput(output) => {
            let mut lines = vec![ViewLine::new(LineKind::Heading, RUNNING)];
            lines.extend(output.lines().map(|l| ViewLine::new(LineKind::Code, l)));
            lines
        }
        Notice::RunFault(message) => {
            let mut lines = message.lines();
            let first = lines.next().unwrap_or_default();
            let mut out = vec![ViewLine::new(LineKind::Error, format!("Hata oluştu: {first}"))];
            out.extend(lines.map(|l| ViewLine::new(LineKind::Error, format!("  {l}"))));
            out
        }
        Notice::Skipped => vec![ViewLine::new(LineKind::Muted, "Kod çalıştırılmadı.")],
        Notice::ComingSoon => vec![ViewLine::new(
            LineKind::Warning,
            "Bu alıştırma yakında eklenecek!",
        )],
        Notice::ResetDone => vec![ViewLine::new(LineKind::Success, "✓ Veriler sıfırlandı!")],
        Notice::ResetCancelled => vec![ViewLine::new(LineKind::Muted, "Sıfırlama iptal edildi.")],
        Notice::Farewell => vec![ViewLine::new(LineKind::Success, FAREWELL)],
        Notice::Warning(message) => vec![ViewLine::new(LineKind::Warning, message.as_str())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_prompt() {
        assert_eq!(range_prompt("Ders seçin", 5), "Ders seçin (1-5, 0=geri): ");
        assert_eq!(range_prompt("Seçiminiz", 1), "Seçiminiz (1, 0=geri): ");
    }

    #[test]
    fn test_completed_notice_mentions_reward() {
        let lines = notice_lines(&Notice::Completed { reward: 10 });
        assert_eq!(lines[0].text, "✓ Ders tamamlandı! +10 puan");
        assert_eq!(lines[0].kind, LineKind::Success);
    }

    #[test]
    fn test_run_output_is_framed() {
        let lines = notice_lines(&Notice::RunOutput("a\nb".to_string()));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].kind, LineKind::Heading);
        assert_eq!(lines[2].text, "b");
    }

    #[test]
    fn test_multiline_fault_keeps_every_line() {
        let lines = notice_lines(&Notice::RunFault("Traceback\n  NameError".to_string()));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].text.starts_with("Hata oluştu: Traceback"));
        assert!(lines.iter().all(|l| l.kind == LineKind::Error));
    }
}
