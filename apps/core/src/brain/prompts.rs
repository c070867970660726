//! Prompt templates for the remote model.
//!
//! All builders are pure: the same text (and category) always renders the
//! same prompt.

use crate::models::Category;

/// Maximum characters of email text embedded in the classification prompt.
pub const CLASSIFICATION_TEXT_LIMIT: usize = 3000;
/// Maximum characters of email text embedded in a reply prompt.
pub const RESPONSE_TEXT_LIMIT: usize = 2000;
/// Appended when the embedded text was cut.
pub const TRUNCATION_MARKER: &str = "\n\n[... texto truncado ...]";

const EMAIL_PLACEHOLDER: &str = "{email_text}";

pub const CLASSIFICATION_SYSTEM_PROMPT: &str = "Você é um assistente especializado em análise e classificação de emails corporativos do setor financeiro brasileiro.

ESPECIALIZAÇÃO:
- Compreensão profunda de contexto corporativo
- Identificação precisa de urgência e prioridade
- Análise de tom e intenção do remetente
- Conhecimento de terminologia do setor financeiro

HABILIDADES:
- Classificação binária com alta precisão
- Justificação clara e concisa das decisões
- Calibração adequada de confiança
- Adaptação ao contexto brasileiro

DIRETRIZES:
- Seja objetivo e preciso
- Baseie-se em evidências do texto
- Considere nuances culturais brasileiras
- Retorne SEMPRE no formato JSON especificado
- Não adicione texto extra fora do JSON";

pub const RESPONSE_SYSTEM_PROMPT: &str = "Você é um assistente especializado em gerar respostas profissionais para emails corporativos no Brasil.

ESPECIALIZAÇÃO:
- Redação corporativa em português brasileiro formal
- Adaptação de tom baseado na categoria do email
- Respostas empáticas mas profissionais
- Clareza e objetividade

DIRETRIZES DE ESCRITA:
- Português brasileiro formal e correto
- Tom profissional mas cordial
- Estrutura clara (abertura, corpo, fechamento)
- Evite jargões excessivos
- Seja conciso mas completo
- Use tratamento respeitoso (Prezado/a, Sr./Sra.)

IMPORTANTE:
- Retorne APENAS o texto da resposta
- NÃO inclua assunto ou linha de assunto
- NÃO inclua assinatura completa (apenas \"Atenciosamente, Equipe...\")
- NÃO adicione explicações ou comentários extras";

const CLASSIFICATION_TEMPLATE: &str = "Analise o email corporativo abaixo e classifique-o em uma das duas categorias.

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
CATEGORIAS E CRITÉRIOS:
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

PRODUTIVO (requer ação ou resposta):

   Indicadores principais:
   • Solicitações de informações ou documentos
   • Dúvidas sobre sistemas, processos ou serviços
   • Problemas técnicos ou operacionais
   • Atualizações sobre casos/requisições em andamento
   • Reclamações ou feedback negativo
   • Urgências ou prazos mencionados
   • Pedidos de suporte ou assistência
   • Questionamentos sobre políticas ou procedimentos
   • Notificações de erros ou inconsistências

   Palavras-chave comuns:
   - Solicitação, requisição, pedido
   - Dúvida, pergunta, questão
   - Problema, erro, falha, bug
   - Status, atualização, andamento
   - Ajuda, suporte, assistência
   - Urgente, prazo, deadline
   - Reclamação, insatisfação

IMPRODUTIVO (não requer ação imediata):

   Indicadores principais:
   • Mensagens de felicitações (aniversário, natal, ano novo)
   • Agradecimentos genéricos
   • Mensagens motivacionais ou inspiracionais
   • Correntes ou spam
   • Comunicados informativos gerais
   • Emails encaminhados sem contexto
   • Piadas ou conteúdo de entretenimento

   Palavras-chave comuns:
   - Feliz, parabéns, congratulações
   - Obrigado, agradecimento
   - Motivação, inspiração
   - Corrente, compartilhe, encaminhe

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
EMAIL A CLASSIFICAR:
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

{email_text}

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
INSTRUÇÕES DE ANÁLISE:
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

1. Leia todo o email cuidadosamente
2. Identifique a intenção principal do remetente
3. Avalie se requer ação ou resposta específica
4. Considere o contexto e tom da mensagem
5. Determine a categoria mais apropriada
6. Calcule sua confiança na classificação (0.0 a 1.0)
7. Forneça justificativa clara e concisa

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
FORMATO DE RESPOSTA (JSON):
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

Responda APENAS com um objeto JSON válido (sem markdown, sem texto adicional):

{
  \"categoria\": \"PRODUTIVO\" ou \"IMPRODUTIVO\",
  \"confianca\": número entre 0.0 e 1.0,
  \"justificativa\": \"explicação concisa em uma frase\"
}

EXEMPLO DE RESPOSTA:
{
  \"categoria\": \"PRODUTIVO\",
  \"confianca\": 0.95,
  \"justificativa\": \"Email solicita status de requisição com prazo definido\"
}";

const PRODUCTIVE_RESPONSE_TEMPLATE: &str = "Gere uma resposta profissional e adequada para o email PRODUTIVO abaixo.

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
EMAIL RECEBIDO (PRODUTIVO):
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

{email_text}

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
DIRETRIZES PARA RESPOSTA PRODUTIVA:
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

ESTRUTURA RECOMENDADA:

1. ABERTURA (tom cordial e profissional)
   • Use \"Prezado(a)\" ou \"Olá\"
   • Agradeça pelo contato se apropriado

2. RECONHECIMENTO (demonstre que entendeu)
   • Reconheça a solicitação/problema mencionado
   • Mostre empatia se for reclamação

3. AÇÃO/PRÓXIMOS PASSOS (seja específico)
   • Informe que a solicitação foi recebida
   • Mencione que está sendo analisada
   • Se possível, indique prazo estimado
   • Ofereça canal para dúvidas adicionais

4. FECHAMENTO (profissional)
   • Use \"Atenciosamente\" ou \"Cordialmente\"
   • Assine como \"Equipe de Atendimento\" ou similar

EXEMPLOS DE ELEMENTOS A INCLUIR:

- \"Recebemos sua solicitação/mensagem...\"
- \"Estamos analisando sua questão...\"
- \"Nossa equipe retornará em breve...\"
- \"Retornaremos em até X dias úteis...\"
- \"Para dúvidas adicionais, entre em contato...\"
- \"Agradecemos pela paciência...\"

EVITE:

- Promessas específicas sem autorização
- Informações técnicas sem certeza
- Tom excessivamente formal ou robótico
- Desculpas excessivas
- Texto muito longo (máx. 8-10 linhas)

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
RESPOSTA (apenas o texto):
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

const UNPRODUCTIVE_RESPONSE_TEMPLATE: &str = "Gere uma resposta breve e cordial para o email IMPRODUTIVO abaixo.

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
EMAIL RECEBIDO (IMPRODUTIVO):
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

{email_text}

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
DIRETRIZES PARA RESPOSTA NÃO-URGENTE:
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

ESTRUTURA RECOMENDADA:

1. ABERTURA (tom amigável)
   • Use \"Olá\" ou \"Prezado(a)\"

2. RESPOSTA (breve e apropriada)
   • Agradeça se for agradecimento
   • Retribua se for felicitação
   • Seja cordial mas conciso

3. FECHAMENTO (simples)
   • \"Atenciosamente\" ou \"Um abraço\"
   • \"Equipe [Nome]\"

EXEMPLOS:

Para Felicitações:
\"Olá, [Nome]! Muito obrigado pelos votos! Desejamos um excelente [época] para você também!\"

Para Agradecimentos:
\"Olá! Ficamos felizes em poder ajudar. Estamos sempre à disposição!\"

Para Mensagens Motivacionais:
\"Olá! Agradecemos pela mensagem inspiradora!\"

CARACTERÍSTICAS:

- Tom amigável mas profissional
- Brevidade (máx. 3-5 linhas)
- Cordialidade sem formalidade excessiva
- Resposta apropriada ao contexto

EVITE:

- Respostas muito longas
- Tom excessivamente formal
- Ignorar completamente o conteúdo
- Respostas genéricas demais

━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
RESPOSTA (apenas o texto):
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

const PRODUCTIVE_FALLBACK_RESPONSE: &str = "Prezado(a),

Recebemos sua mensagem e estamos analisando sua solicitação. Nossa equipe retornará em breve com uma resposta detalhada.

Caso tenha dúvidas adicionais, não hesite em entrar em contato.

Atenciosamente,
Equipe de Atendimento";

const UNPRODUCTIVE_FALLBACK_RESPONSE: &str = "Olá,

Agradecemos pela sua mensagem!

Atenciosamente,
Equipe de Atendimento";

/// Cuts `text` to at most `limit` characters, appending [`TRUNCATION_MARKER`] if anything was dropped.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Renders the classification prompt around the reduced email text.
pub fn classification_prompt(text: &str) -> String {
    let embedded = truncate_chars(text, CLASSIFICATION_TEXT_LIMIT);
    CLASSIFICATION_TEMPLATE.replacen(EMAIL_PLACEHOLDER, &embedded, 1)
}

/// Renders the reply-generation prompt, picking the template for `category`.
pub fn response_prompt(text: &str, category: Category) -> String {
    let embedded = truncate_chars(text, RESPONSE_TEXT_LIMIT);
    let template = match category {
        Category::Productive => PRODUCTIVE_RESPONSE_TEMPLATE,
        Category::Unproductive => UNPRODUCTIVE_RESPONSE_TEMPLATE,
    };
    template.replacen(EMAIL_PLACEHOLDER, &embedded, 1)
}

/// Canned reply used by simulation and when reply generation gives up.
pub fn fallback_response(category: Category) -> &'static str {
    match category {
        Category::Productive => PRODUCTIVE_FALLBACK_RESPONSE,
        Category::Unproductive => UNPRODUCTIVE_FALLBACK_RESPONSE,
    }
}
