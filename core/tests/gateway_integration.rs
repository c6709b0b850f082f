//! Integration tests for the gateway client against a fake provider

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use vg_core::services::signing::sign;
    use vg_core::{
        GatewayClient, GatewayError, GatewayResult, HttpTransport, InMemoryThrottleStore,
        ManualClock, NoOpSmsLogRepository, RequestContext, TransportResponse,
    };
    use vg_shared::{ProviderConfig, ThrottleConfig};

    const SECRET: &str = "integrationSecret";

    /// Checks signatures the way the provider does and keeps sent codes
    struct FakeProvider {
        inbox: Mutex<Vec<(String, String)>>,
    }

    impl FakeProvider {
        fn new() -> Self {
            Self {
                inbox: Mutex::new(Vec::new()),
            }
        }

        fn last_code_for(&self, phone: &str) -> Option<String> {
            self.inbox
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(p, _)| p == phone)
                .map(|(_, c)| c.clone())
        }
    }

    #[async_trait]
    impl HttpTransport for FakeProvider {
        async fn post_form(
            &self,
            _url: &str,
            form: &[(String, String)],
            _timeout: Duration,
        ) -> GatewayResult<TransportResponse> {
            let mut params: BTreeMap<String, String> = form.iter().cloned().collect();
            let signature = params.remove("Signature").unwrap_or_default();

            if sign(&params, SECRET)? != signature {
                return Ok(TransportResponse::new(
                    400,
                    r#"{"Code":"SignatureDoesNotMatch","Message":"Specified signature is not matched with our calculation."}"#,
                ));
            }

            if params.get("Action").map(String::as_str) == Some("SendSms") {
                let template: serde_json::Value =
                    serde_json::from_str(&params["TemplateParam"]).unwrap();
                self.inbox.lock().unwrap().push((
                    params["PhoneNumbers"].clone(),
                    template["code"].as_str().unwrap().to_string(),
                ));
                return Ok(TransportResponse::new(
                    200,
                    r#"{"Code":"OK","Message":"OK","BizId":"1^0","RequestId":"R1"}"#,
                ));
            }

            Ok(TransportResponse::new(200, r#"{"EnvId":"1","RequestId":"R2"}"#))
        }
    }

    fn provider(secret: &str) -> ProviderConfig {
        ProviderConfig {
            access_key_id: "integrationId".to_string(),
            access_secret: secret.to_string(),
            captcha_sign_name: "洛颜".to_string(),
            captcha_template_code: "SMS_100000001".to_string(),
            account_name: "noreply@mail.example.com".to_string(),
            from_alias: "Example".to_string(),
            ..ProviderConfig::default()
        }
    }

    type Client = GatewayClient<FakeProvider, InMemoryThrottleStore, NoOpSmsLogRepository>;

    fn client(secret: &str) -> (Arc<Client>, Arc<FakeProvider>, ManualClock) {
        let clock = ManualClock::default();
        let provider_stub = Arc::new(FakeProvider::new());
        let store = Arc::new(InMemoryThrottleStore::with_clock(Arc::new(clock.clone())));
        let client = GatewayClient::new(
            provider_stub.clone(),
            store,
            Arc::new(NoOpSmsLogRepository::new()),
            provider(secret),
            ThrottleConfig::default(),
        )
        .with_clock(Arc::new(clock.clone()));
        (Arc::new(client), provider_stub, clock)
    }

    #[tokio::test]
    async fn test_code_round_trip_through_provider() {
        let (client, provider_stub, _clock) = client(SECRET);
        let ctx = RequestContext::new("203.0.113.7".parse().unwrap());

        client
            .send_sms_code("13812345678", &ctx, None, None)
            .await
            .unwrap();
        let delivered = provider_stub.last_code_for("13812345678").unwrap();

        assert!(client.verify_sms_code("13812345678", &delivered).await.is_ok());
        assert_eq!(
            client.verify_sms_code("13812345678", &delivered).await.unwrap_err(),
            GatewayError::CodeExpired
        );
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected_by_provider() {
        let (client, _provider_stub, _clock) = client("wrongSecret");
        let ctx = RequestContext::new("203.0.113.7".parse().unwrap());

        let err = client
            .send_sms_code("13812345678", &ctx, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ProviderError { .. }));

        let err = client
            .send_mail("user@example.com", "Subject", "<p>Body</p>")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::ProviderError {
                message: "Specified signature is not matched with our calculation.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_resend_after_cooldown_replaces_code() {
        let (client, provider_stub, clock) = client(SECRET);
        let ctx = RequestContext::new("203.0.113.7".parse().unwrap());

        client.send_sms_code("13812345678", &ctx, None, Some("111111")).await.unwrap();
        clock.advance_secs(60);
        client.send_sms_code("13812345678", &ctx, None, Some("222222")).await.unwrap();
        assert_eq!(
            provider_stub.last_code_for("13812345678").as_deref(),
            Some("222222")
        );

        assert_eq!(
            client.verify_sms_code("13812345678", "111111").await.unwrap_err(),
            GatewayError::CodeMismatch
        );
        assert!(client.verify_sms_code("13812345678", "222222").await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sends_for_different_phones() {
        let (client, provider_stub, _clock) = client(SECRET);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    let ctx = RequestContext::new(format!("198.51.100.{}", i).parse().unwrap());
                    client
                        .send_sms_code(&format!("1370000000{}", i), &ctx, None, None)
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        for i in 0..8 {
            let phone = format!("1370000000{}", i);
            let code = provider_stub.last_code_for(&phone).unwrap();
            assert!(client.verify_sms_code(&phone, &code).await.is_ok());
        }
    }
}
