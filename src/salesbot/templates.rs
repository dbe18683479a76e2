//! Reply templates. All outbound text is legacy-Markdown formatted.

use crate::salesbot::agents::Agent;
use crate::salesbot::keyboard::{BTN_CONTACT, BTN_QUOTE, BTN_SERVICES};

/// Greeting sent on /start, above the reply keyboard.
pub fn welcome() -> String {
    "\
👋 *Olá! FirstSeller aqui!* 🤖

*Como posso ajudar?*
✓ Cotação de produtos/serviços
✓ Fornecedores confiáveis
✓ Soluções personalizadas

*Escolha abaixo:* 👇"
        .to_string()
}

/// Lead-capture invitation with the form link.
pub fn form_invite(form_link: &str) -> String {
    format!(
        "\
📋 *Vamos te ajudar!*

🔗 *Formulário:*
{form_link}

⏰ *1 minuto* | ⚡ *15min resposta*"
    )
}

/// Contact card for a human agent.
pub fn agent_card(agent: &Agent) -> String {
    format!(
        "\
📞 *Atendente {}*

📱 {}
💬 [WhatsApp]({})

⏰ Seg-Sex: 8h-18h",
        agent.name, agent.phone, agent.whatsapp
    )
}

pub fn no_agent_available() -> String {
    "😕 Nenhum atendente disponível no momento. Tente novamente mais tarde.".to_string()
}

/// Services overview for the ℹ️ button.
pub fn services() -> String {
    "\
ℹ️ *Nossos serviços*

📦 Cotação de produtos e serviços
🤝 Fornecedores confiáveis e verificados
🛠 Soluções personalizadas para sua empresa

Use *📋 Cotação* para receber uma proposta."
        .to_string()
}

/// Usage guide for /guia and for unmatched text.
pub fn guide() -> String {
    format!(
        "\
📖 *Guia rápido*

{BTN_QUOTE} — receber o formulário de cotação
{BTN_CONTACT} — falar com um atendente humano
{BTN_SERVICES} — conhecer nossos serviços

Digite /start para abrir o menu."
    )
}

/// Short hint for text that matches no dispatch rule.
pub fn fallback_hint() -> String {
    "🤔 Não entendi. Digite /guia para ver as opções disponíveis.".to_string()
}

/// Refusal for admin-only surfaces.
pub fn denied() -> String {
    "🔒 Este comando é restrito aos administradores.".to_string()
}

/// Confirmation after the counters were zeroed.
pub fn reset_done() -> String {
    "🧹 *Tudo zerado!* Contadores reiniciados com sucesso.".to_string()
}

/// Self-test report for /testar.
pub fn self_test(uptime_label: &str, registered_users: usize) -> String {
    format!(
        "\
🧪 *Teste do bot*

✅ Bot operacional
💾 Banco de dados acessível ({registered_users} cadastrados)
⏰ Ativo há {uptime_label}"
    )
}
