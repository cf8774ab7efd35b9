// tests/dashboard_gate.rs
mod common;

use axum::http::StatusCode;
use chamada::{models::profile::UserType, services::code_generator::CodeGenerator, state::AppState};
use common::{body_text, count_rows, create_profile, location, test_pool, test_state, TestClient};
use std::time::Duration;

// Extrai o código da mensagem "Sala criada com sucesso! Código: XXXXXX"
fn code_from_location(location: &str) -> String {
    let (_, rest) = location.split_once("Código: ").expect("código na mensagem");
    rest.chars().take(6).collect()
}

#[tokio::test]
async fn anonymous_visitor_is_sent_to_login() {
    let pool = test_pool().await;
    let mut client = TestClient::new(test_state(pool, 1));

    for uri in ["/", "/professor", "/aluno"] {
        let response = client.get(uri).await;
        assert_eq!(location(&response), "/login", "rota {}", uri);
    }

    let response = client.post_form("/aluno/entrar", &[("code", "ABC123")]).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn login_page_renders_for_anonymous_visitor() {
    let pool = test_pool().await;
    let mut client = TestClient::new(test_state(pool, 1));

    let body = body_text(client.get("/login").await).await;
    assert!(body.contains("<form"));
}

#[tokio::test]
async fn user_is_kept_on_their_own_dashboard() {
    let pool = test_pool().await;
    let mut client = TestClient::new(test_state(pool, 2));

    let response = client.register("Rui", "rui@escola.pt", "aluno").await;
    assert_eq!(location(&response), "/aluno");

    assert_eq!(location(&client.get("/professor").await), "/aluno");
    assert_eq!(location(&client.get("/").await), "/aluno");
    let body = body_text(client.get("/aluno").await).await;
    assert!(body.contains("Rui"));
}

#[tokio::test]
async fn teacher_creates_and_student_joins_over_http() {
    let pool = test_pool().await;
    let state = test_state(pool.clone(), 3);
    let mut teacher = TestClient::new(state.clone());
    let mut student = TestClient::new(state);

    assert_eq!(location(&teacher.register("Prof. Ana", "ana@escola.pt", "professor").await), "/professor");
    let response = teacher
        .post_form(
            "/professor/salas",
            &[
                ("name", "Math"),
                ("period", "2024.1"),
                ("schedule", "Seg 10h"),
                ("max_absences", "15"),
                ("total_classes", "60"),
            ],
        )
        .await;
    let target = location(&response);
    assert!(target.starts_with("/professor?success="));
    let code = code_from_location(&target);
    assert_eq!(code.len(), 6);

    let body = body_text(teacher.get("/professor").await).await;
    assert!(body.contains("Math"));
    assert!(body.contains(&code));

    student.register("Rui", "rui@escola.pt", "aluno").await;
    let response = student.post_form("/aluno/entrar", &[("code", &code.to_lowercase())]).await;
    assert!(location(&response).contains("entrou na sala com sucesso"));

    let body = body_text(student.get("/aluno").await).await;
    assert!(body.contains("Math"));

    let response = student.post_form("/aluno/entrar", &[("code", &code)]).await;
    assert!(location(&response).contains("já está matriculado"));
    assert_eq!(count_rows(&pool, "enrollments").await, 1);
}

#[tokio::test]
async fn unknown_code_over_http_reports_invalid_code() {
    let pool = test_pool().await;
    let mut student = TestClient::new(test_state(pool.clone(), 4));

    student.register("Rui", "rui@escola.pt", "aluno").await;
    let response = student.post_form("/aluno/entrar", &[("code", "ZZZ999")]).await;
    let target = location(&response);
    assert!(target.starts_with("/aluno?error="));
    assert!(target.contains("Código de sala inválido"));
    assert_eq!(count_rows(&pool, "enrollments").await, 0);
}

#[tokio::test]
async fn student_cannot_reach_classroom_creation() {
    let pool = test_pool().await;
    let mut student = TestClient::new(test_state(pool.clone(), 5));

    student.register("Rui", "rui@escola.pt", "aluno").await;
    let response = student
        .post_form(
            "/professor/salas",
            &[("name", "Math"), ("period", "2024.1"), ("max_absences", "15"), ("total_classes", "60")],
        )
        .await;
    assert_eq!(location(&response), "/aluno");
    assert_eq!(count_rows(&pool, "classrooms").await, 0);
}

#[tokio::test]
async fn invalid_limits_over_http_redirect_with_error() {
    let pool = test_pool().await;
    let mut teacher = TestClient::new(test_state(pool.clone(), 6));

    teacher.register("Prof. Ana", "ana@escola.pt", "professor").await;
    let response = teacher
        .post_form(
            "/professor/salas",
            &[("name", "Math"), ("period", "2024.1"), ("max_absences", "0"), ("total_classes", "60")],
        )
        .await;
    assert!(location(&response).starts_with("/professor?error="));
    assert_eq!(count_rows(&pool, "classrooms").await, 0);
}

#[tokio::test]
async fn teacher_archives_own_classroom() {
    let pool = test_pool().await;
    let state = test_state(pool.clone(), 7);
    let mut teacher = TestClient::new(state);

    teacher.register("Prof. Ana", "ana@escola.pt", "professor").await;
    teacher
        .post_form(
            "/professor/salas",
            &[("name", "Math"), ("period", "2024.1"), ("max_absences", "15"), ("total_classes", "60")],
        )
        .await;
    let classroom_id: String = sqlx::query_scalar("SELECT id FROM classrooms LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();

    let uri = format!("/professor/salas/{}/arquivar", classroom_id);
    let response = teacher.post_form(&uri, &[("archived", "true")]).await;
    assert!(location(&response).starts_with("/professor?success="));

    let archived: bool = sqlx::query_scalar("SELECT archived FROM classrooms WHERE id = ?1")
        .bind(&classroom_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(archived);
}

#[tokio::test]
async fn duplicate_email_is_rejected_on_register() {
    let pool = test_pool().await;
    create_profile(&pool, "Rui", "rui@escola.pt", UserType::Aluno).await;
    let mut client = TestClient::new(test_state(pool.clone(), 8));

    let body = body_text(client.register("Outro Rui", "RUI@escola.pt", "aluno").await).await;
    assert!(body.contains("Email já registado"));
    assert_eq!(count_rows(&pool, "profiles").await, 1);
}

#[tokio::test]
async fn logout_closes_the_dashboard() {
    let pool = test_pool().await;
    let mut client = TestClient::new(test_state(pool, 9));

    client.register("Rui", "rui@escola.pt", "aluno").await;
    body_text(client.get("/aluno").await).await;

    assert_eq!(location(&client.get("/logout").await), "/login");
    assert_eq!(location(&client.get("/aluno").await), "/login");
}

#[tokio::test]
async fn teacher_is_kept_off_the_student_dashboard() {
    let pool = test_pool().await;
    let mut client = TestClient::new(test_state(pool, 10));

    client.register("Prof. Ana", "ana@escola.pt", "professor").await;
    assert_eq!(location(&client.get("/aluno").await), "/professor");
    let response = client.post_form("/aluno/entrar", &[("code", "ABC123")]).await;
    assert_eq!(location(&response), "/professor");
}

#[tokio::test]
async fn session_of_deleted_profile_goes_back_to_login() {
    let pool = test_pool().await;
    let mut client = TestClient::new(test_state(pool.clone(), 11));

    client.register("Rui", "rui@escola.pt", "aluno").await;
    sqlx::query("DELETE FROM profiles").execute(&pool).await.unwrap();

    assert_eq!(location(&client.get("/aluno").await), "/login");
    // Sessão limpa: o login abre normalmente, sem voltar ao dashboard
    let body = body_text(client.get("/login").await).await;
    assert!(body.contains("<form"));
}

#[tokio::test]
async fn slow_profile_lookup_answers_service_unavailable() {
    let pool = test_pool().await;
    let state = AppState::new(pool.clone(), CodeGenerator::seeded(12), Duration::from_millis(200));
    let mut client = TestClient::new(state);

    client.register("Rui", "rui@escola.pt", "aluno").await;

    // A única conexão do pool fica ocupada: a busca do perfil não termina a tempo
    let held = pool.acquire().await.unwrap();
    let response = client.get("/aluno").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    drop(held);

    body_text(client.get("/aluno").await).await;
}

#[tokio::test]
async fn dashboards_open_when_statistics_fail() {
    let pool = test_pool().await;
    let state = test_state(pool.clone(), 13);
    let mut teacher = TestClient::new(state.clone());
    let mut student = TestClient::new(state);

    teacher.register("Prof. Ana", "ana@escola.pt", "professor").await;
    let response = teacher
        .post_form(
            "/professor/salas",
            &[("name", "Math"), ("period", "2024.1"), ("max_absences", "15"), ("total_classes", "60")],
        )
        .await;
    let code = code_from_location(&location(&response));
    student.register("Rui", "rui@escola.pt", "aluno").await;
    student.post_form("/aluno/entrar", &[("code", &code)]).await;

    // Sem a tabela de presenças as estatísticas falham, mas as listas não
    sqlx::query("DROP TABLE attendance").execute(&pool).await.unwrap();

    let body = body_text(teacher.get("/professor").await).await;
    assert!(body.contains("Math"));
    let body = body_text(student.get("/aluno").await).await;
    assert!(body.contains("Math"));
}
