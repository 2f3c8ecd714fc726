//! Built-in notice strings. Unknown languages fall back to English.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    #[serde(alias = "chinese")]
    ChineseSimplified,
    ChineseTraditional,
    French,
    German,
    Japanese,
    Korean,
    Portuguese,
    Russian,
    Spanish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    ApiErrorTitle,
    ApiErrorMessage,
    MissingTitle,
    MissingMessage,
    DisabledTitle,
    DisabledMessage,
    WaitingTitle,
    WaitingMessage,
    CloseButton,
}

impl TextKey {
    pub const fn text(self, language: Language) -> &'static str {
        use Language::*;

        match self {
            Self::ApiErrorTitle => match language {
                ChineseSimplified => "API 错误",
                ChineseTraditional => "API 錯誤",
                French => "Erreur API",
                German => "API-Fehler",
                Japanese => "APIエラー",
                Korean => "API 오류",
                Portuguese => "Erro de API",
                Russian => "Ошибка API",
                Spanish => "Error de API",
                English => "API Error",
            },
            Self::ApiErrorMessage => match language {
                ChineseSimplified => "无法查询 MOD 启用状态，请联系作者。",
                ChineseTraditional => "無法查詢 MOD 啟用狀態，請聯繫作者。",
                French => "Impossible de connaître l'état d'activation des MODs, contactez l'auteur.",
                German => "MOD-Aktivierungsstatus nicht abfragbar, bitte Autor kontaktieren.",
                Japanese => "MODの有効状態を取得できません。作者に連絡してください。",
                Korean => "MOD 활성화 상태를 조회할 수 없습니다. 작성자에게 문의하세요.",
                Portuguese => "Não é possível consultar o estado de ativação dos MODs, contate o autor.",
                Russian => "Невозможно узнать состояние модов, свяжитесь с автором.",
                Spanish => "No se puede consultar el estado de activación de los MODs, contacte al autor.",
                English => "Cannot query the mod activation policy, please contact the author.",
            },
            Self::MissingTitle => match language {
                ChineseSimplified => "缺失前置 (未安装)",
                ChineseTraditional => "缺失前置 (未安裝)",
                French => "Dépendance Manquante",
                German => "Fehlende Abhängigkeit",
                Japanese => "前提MOD不足 (未インストール)",
                Korean => "선행 MOD 누락 (미설치)",
                Portuguese => "Dependência Ausente",
                Russian => "Отсутствует зависимость",
                Spanish => "Dependencia Faltante",
                English => "Missing Dependency",
            },
            Self::MissingMessage => match language {
                ChineseSimplified => "请订阅以下 MOD:",
                ChineseTraditional => "請訂閱以下 MOD:",
                French => "Veuillez vous abonner aux MODs suivants :",
                German => "Bitte abonnieren Sie folgende MODs:",
                Japanese => "次のMODを購読してください:",
                Korean => "다음 MOD를 구독하십시오:",
                Portuguese => "Por favor, inscreva-se nos seguintes MODs:",
                Russian => "Пожалуйста, подпишитесь на следующие моды:",
                Spanish => "Por favor suscríbase a los siguientes MODs:",
                English => "Please subscribe to the following MODs:",
            },
            Self::DisabledTitle => match language {
                ChineseSimplified => "前置未启用",
                ChineseTraditional => "前置未啟用",
                French => "Dépendance Désactivée",
                German => "Abhängigkeit Deaktiviert",
                Japanese => "前提MOD無効",
                Korean => "선행 MOD 비활성화됨",
                Portuguese => "Dependência Desativada",
                Russian => "Зависимость Отключена",
                Spanish => "Dependencia Desactivada",
                English => "Dependency Disabled",
            },
            Self::DisabledMessage => match language {
                ChineseSimplified => "前置库被禁用，请在 MOD 列表中勾选:",
                ChineseTraditional => "前置庫被禁用，請在 MOD 列表中勾選:",
                French => "Bibliothèque désactivée, veuillez cocher dans la liste :",
                German => "Bibliothek deaktiviert, bitte in der Liste aktivieren:",
                Japanese => "前提ライブラリが無効です。リストで有効にしてください:",
                Korean => "라이브러리가 비활성화되었습니다. 목록에서 확인하십시오:",
                Portuguese => "Biblioteca desativada, verifique na lista de MODs:",
                Russian => "Библиотека отключена, пожалуйста, отметьте в списке:",
                Spanish => "Biblioteca desactivada, marque en la lista de MODs:",
                English => "Dependency library is disabled, please check it in the MOD list:",
            },
            Self::WaitingTitle => match language {
                ChineseSimplified => "正在等待前置",
                ChineseTraditional => "正在等待前置",
                French => "En attente des dépendances",
                German => "Warte auf Abhängigkeiten",
                Japanese => "前提MODを待機中",
                Korean => "선행 MOD 대기 중",
                Portuguese => "Aguardando Dependências",
                Russian => "Ожидание зависимостей",
                Spanish => "Esperando Dependencias",
                English => "Waiting for Dependencies",
            },
            Self::WaitingMessage => match language {
                ChineseSimplified => "以下前置尚未加载完成:",
                ChineseTraditional => "以下前置尚未載入完成:",
                French => "Les MODs suivants ne sont pas encore chargés :",
                German => "Folgende MODs sind noch nicht geladen:",
                Japanese => "次のMODはまだ読み込まれていません:",
                Korean => "다음 MOD가 아직 로드되지 않았습니다:",
                Portuguese => "Os seguintes MODs ainda não foram carregados:",
                Russian => "Следующие моды ещё не загружены:",
                Spanish => "Los siguientes MODs aún no se han cargado:",
                English => "The following MODs have not finished loading:",
            },
            Self::CloseButton => match language {
                ChineseSimplified => "[ 点击关闭 ]",
                ChineseTraditional => "[ 點擊關閉 ]",
                French => "[ Fermer ]",
                German => "[ Schließen ]",
                Japanese => "[ 閉じる ]",
                Korean => "[ 닫기 ]",
                Portuguese => "[ Fechar ]",
                Russian => "[ Закрыть ]",
                Spanish => "[ Cerrar ]",
                English => "[ Click to Close ]",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_the_default() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(
            TextKey::MissingTitle.text(Language::default()),
            "Missing Dependency"
        );
    }

    #[test]
    fn language_names_parse_from_ron() {
        let language: Language = ron::from_str("chinese_simplified").unwrap();
        assert_eq!(language, Language::ChineseSimplified);
        assert_eq!(TextKey::DisabledTitle.text(language), "前置未启用");
    }

    #[test]
    fn every_host_language_parses() {
        let alias: Language = ron::from_str("chinese").unwrap();
        assert_eq!(alias, Language::ChineseSimplified);

        for (name, close) in [
            ("french", "[ Fermer ]"),
            ("korean", "[ 닫기 ]"),
            ("portuguese", "[ Fechar ]"),
            ("spanish", "[ Cerrar ]"),
        ] {
            let language: Language = ron::from_str(name).unwrap();
            assert_eq!(TextKey::CloseButton.text(language), close);
        }
    }
}
